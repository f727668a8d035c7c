//! # Content Store
//!
//! In-memory snapshot of the CMS content the site API serves.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RwLock<ContentSnapshot>                                                │
//! │                                                                         │
//! │  readers: menu, listing, product detail, search  (many at once)         │
//! │  writers: newsletter signup, inquiry submission  (short, exclusive)     │
//! │                                                                         │
//! │  Guards are dropped before a handler awaits anything else.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gpi_core::validation::NewInquiry;
use gpi_core::{
    Brand, Category, Inquiry, InquiryStatus, NewsletterSubscriber, Product, SiteSettings,
    SubscriptionStatus,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::info;
use uuid::Uuid;

/// Source recorded for signups made through the footer form.
pub const WEBSITE_SOURCE: &str = "website";

/// Everything the site reads and writes, as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentSnapshot {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub brands: Vec<Brand>,
    pub site_settings: SiteSettings,
    pub inquiries: Vec<Inquiry>,
    pub subscribers: Vec<NewsletterSubscriber>,
}

/// Store errors (startup only).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read content snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid content snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// What a newsletter signup did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Created,
    /// A previously unsubscribed address was switched back on.
    Resubscribed,
    AlreadySubscribed,
}

/// Shared content store.
#[derive(Debug, Default)]
pub struct ContentStore {
    snapshot: RwLock<ContentSnapshot>,
}

impl ContentStore {
    /// Creates a store over an existing snapshot.
    pub fn new(snapshot: ContentSnapshot) -> Self {
        ContentStore {
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Loads a snapshot from a JSON file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: ContentSnapshot =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            categories = snapshot.categories.len(),
            products = snapshot.products.len(),
            "Content snapshot loaded"
        );
        Ok(ContentStore::new(snapshot))
    }

    /// Read access to the whole snapshot.
    pub async fn read(&self) -> RwLockReadGuard<'_, ContentSnapshot> {
        self.snapshot.read().await
    }

    /// Records a newsletter signup.
    ///
    /// Addresses compare case-insensitively. An unsubscribed address is
    /// resubscribed with a fresh `subscribed_at`; its source is kept.
    pub async fn subscribe(&self, email: &str, now: DateTime<Utc>) -> SubscribeOutcome {
        let mut snapshot = self.snapshot.write().await;

        if let Some(existing) = snapshot
            .subscribers
            .iter_mut()
            .find(|s| s.email.eq_ignore_ascii_case(email))
        {
            return match existing.status {
                SubscriptionStatus::Subscribed => SubscribeOutcome::AlreadySubscribed,
                SubscriptionStatus::Unsubscribed => {
                    existing.status = SubscriptionStatus::Subscribed;
                    existing.subscribed_at = now;
                    SubscribeOutcome::Resubscribed
                }
            };
        }

        snapshot.subscribers.push(NewsletterSubscriber {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            status: SubscriptionStatus::Subscribed,
            subscribed_at: now,
            source: WEBSITE_SOURCE.to_string(),
        });
        SubscribeOutcome::Created
    }

    /// Stores a validated inquiry with status `new`.
    pub async fn create_inquiry(&self, inquiry: NewInquiry, now: DateTime<Utc>) -> Inquiry {
        let record = Inquiry {
            id: Uuid::new_v4().to_string(),
            full_name: inquiry.full_name,
            company: inquiry.company,
            phone: inquiry.phone,
            email: inquiry.email,
            product: inquiry.product,
            product_url: inquiry.product_url,
            additional_info: inquiry.additional_info,
            status: InquiryStatus::New,
            created_at: now,
        };

        self.snapshot.write().await.inquiries.push(record.clone());
        record
    }
}
