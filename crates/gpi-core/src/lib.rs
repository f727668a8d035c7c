//! # gpi-core: Pure Catalog Logic for the GP Invest Website
//!
//! This crate holds every rule the website applies to catalog content, as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      GP Invest Website Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Page Renderer (TypeScript)                     │   │
//! │  │    Header menu ──► Product list ──► Product page ──► Forms     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP/JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    site-api (axum)                              │   │
//! │  │    /api/menu, /api/products, /api/search, /api/orders, ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ gpi-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │ category  │  │   menu    │  │ rich_text │  │   │
//! │  │   │ EUR + BGN │  │ tree/flat │  │  groups   │  │  → HTML   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │  catalog  │  │  search   │  │validation │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Content records (Category, Product, SiteSettings, ...)
//! - [`money`] - Integer-cent amounts and Bulgarian display format
//! - [`pricing`] - Dual-currency price display
//! - [`category`] - Category tree projection and flattening
//! - [`menu`] - Site navigation and virtual parent groups
//! - [`catalog`] - Listing filters, sorting and counters
//! - [`search`] - Header search suggestions
//! - [`rich_text`] - Rich-text document to HTML
//! - [`validation`] - Visitor input checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; inputs are never mutated
//! 2. **No I/O**: content arrives as plain values from the host
//! 3. **Explicit Settings**: display settings are parameters, never globals
//! 4. **Exact Money**: decimals in, integer cents out, half-up rounding
//!
//! ## Example Usage
//!
//! ```rust
//! use gpi_core::pricing::{format_price, CurrencyDisplaySettings};
//! use rust_decimal::Decimal;
//!
//! let settings = CurrencyDisplaySettings::default();
//! let price = format_price(Decimal::new(4999, 2), settings).unwrap();
//!
//! assert_eq!(price.primary_text, "49,99 €");
//! assert_eq!(price.secondary_text.as_deref(), Some("97,77 лв."));
//! assert_eq!(price.combined_text, "49,99 € (97,77 лв.)");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod category;
pub mod error;
pub mod menu;
pub mod money;
pub mod pricing;
pub mod rich_text;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use gpi_core::Money` instead of
// `use gpi_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Currency, Money};
pub use pricing::{format_price, CurrencyDisplaySettings, PriceDisplay};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products shown in the home page "featured" strip.
pub const FEATURED_PRODUCTS_LIMIT: usize = 8;
