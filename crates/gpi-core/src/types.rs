//! # Domain Types
//!
//! Content records as the core consumes them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │    Product      │   │  SiteSettings   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  category (id)  │   │  companyName    │       │
//! │  │  slug           │   │  slug           │   │  eurToBgnRate   │       │
//! │  │  parent (id?)   │   │  price (EUR)    │   │  showBgnPrice   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐                        │
//! │  │    Inquiry      │   │ NewsletterSubscriber │                        │
//! │  │  ─────────────  │   │  ──────────────────  │                        │
//! │  │  fullName       │   │  email               │                        │
//! │  │  company        │   │  status              │                        │
//! │  │  status         │   │  subscribedAt        │                        │
//! │  └─────────────────┘   └──────────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Plain Ids Only
//! The CMS may hand back a relation either as an expanded record or as a bare
//! id. The host normalizes to the id before anything reaches this crate, so
//! `Product::category` and `Category::parent` are always plain strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::pricing::CurrencyDisplaySettings;
use crate::rich_text::RichTextDocument;

fn default_true() -> bool {
    true
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// `parent` points at another category's `id`; `None` marks a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Icon key: cash-register, printer, pos-terminal, software, accessories.
    #[serde(default)]
    pub icon: Option<String>,
}

impl Category {
    /// Creates a root category with no description or icon.
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            parent: None,
            description: None,
            icon: None,
        }
    }

    /// Sets the parent category id.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Checks if this category has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

// =============================================================================
// Brand
// =============================================================================

/// A manufacturer record. Products name their brand as free text, matched
/// against `name` case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name shown on cards and the detail page.
    pub name: String,

    /// URL slug, unique across products.
    pub slug: String,

    /// Brand or manufacturer (Datecs, Tremol, ...).
    #[serde(default)]
    pub brand: String,

    /// Model number.
    #[serde(default)]
    pub model: Option<String>,

    /// One-line teaser for product cards.
    #[serde(default)]
    pub short_description: Option<String>,

    /// Price in EUR. `0` means "price on request".
    #[ts(as = "String")]
    pub price: Decimal,

    /// Id of the owning category.
    pub category: String,

    #[serde(default = "default_true")]
    pub in_stock: bool,

    /// Shown on the home page.
    #[serde(default)]
    pub featured: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Rich-text body for the detail page.
    #[serde(default)]
    #[ts(skip)]
    pub description: Option<RichTextDocument>,
}

impl Product {
    /// Checks if the product has no fixed price.
    #[inline]
    pub fn is_quote_only(&self) -> bool {
        self.price.is_zero()
    }
}

// =============================================================================
// Site Settings
// =============================================================================

/// The site-wide settings record (CMS global).
///
/// Only the two currency fields feed the core; the rest is carried through
/// to the renderer untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub company_name: String,
    pub tagline: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub working_hours: Option<String>,
    #[ts(as = "Option<String>")]
    pub eur_to_bgn_rate: Option<Decimal>,
    pub show_bgn_price: Option<bool>,
}

impl SiteSettings {
    /// Builds the per-request currency settings, filling unset fields with
    /// the defaults (fixed peg, BGN shown).
    pub fn currency_settings(&self) -> CoreResult<CurrencyDisplaySettings> {
        CurrencyDisplaySettings::from_site_fields(self.eur_to_bgn_rate, self.show_bgn_price)
    }
}

// =============================================================================
// Inquiry (Order)
// =============================================================================

/// Lifecycle of a customer inquiry as handled by the sales team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    /// Just submitted from the website.
    #[default]
    New,
    Processing,
    Contacted,
    Completed,
    Cancelled,
}

/// A quote request / order submitted through the website form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    pub full_name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    /// Product name the inquiry is about.
    pub product: Option<String>,
    pub product_url: Option<String>,
    pub additional_info: Option<String>,
    pub status: InquiryStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Newsletter
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Subscribed,
    Unsubscribed,
}

/// A newsletter signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    pub id: String,
    pub email: String,
    pub status: SubscriptionStatus,
    #[ts(as = "String")]
    pub subscribed_at: DateTime<Utc>,
    /// Where the signup came from; "website" for the footer form.
    pub source: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
