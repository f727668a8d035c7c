//! # GP Invest Site API
//!
//! HTTP/JSON server behind the website's pages and forms.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Site API Services                               │
//! │                                                                         │
//! │  ┌────────────────────┐  ┌────────────────────┐  ┌───────────────────┐ │
//! │  │  Catalog           │  │  Forms             │  │  Operations       │ │
//! │  │                    │  │                    │  │                   │ │
//! │  │ GET /api/menu      │  │ POST /api/orders   │  │ POST              │ │
//! │  │ GET /api/products  │  │ POST               │  │  /api/revalidate  │ │
//! │  │ GET /api/products/ │  │  /api/newsletter   │  │ GET /api/health   │ │
//! │  │        {slug}      │  │                    │  │                   │ │
//! │  │ GET /api/search    │  │                    │  │                   │ │
//! │  └────────────────────┘  └────────────────────┘  └───────────────────┘ │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  AppState: SiteConfig • ContentStore (RwLock) • ResponseCache    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `SITE_API_PORT` - HTTP port (default: 3001)
//! - `REVALIDATE_SECRET` - Shared secret for `/api/revalidate`
//! - `EUR_TO_BGN_RATE` - Fallback conversion rate (default: 1.95583)
//! - `SHOW_BGN_PRICE` - Fallback BGN toggle (default: true)
//! - `CONTENT_SNAPSHOT` - JSON content snapshot to load at startup
//! - `SEARCH_RESULT_LIMIT` - Search suggestions per query (default: 8)

pub mod cache;
pub mod config;
pub mod error;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// Re-exports
pub use cache::ResponseCache;
pub use config::SiteConfig;
pub use error::{ApiError, ApiResult};
pub use store::{ContentSnapshot, ContentStore};

use crate::services::{
    catalog_service, health_service, newsletter_service, order_service, revalidate_service,
    search_service,
};

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    pub config: SiteConfig,
    pub store: ContentStore,
    pub cache: ResponseCache,
}

impl AppState {
    pub fn new(config: SiteConfig, store: ContentStore) -> Self {
        AppState {
            config,
            store,
            cache: ResponseCache::new(),
        }
    }
}

/// Builds the HTTP router with tracing and CORS layers.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/menu", get(catalog_service::menu))
        .route("/api/products", get(catalog_service::list_products))
        .route("/api/products/{slug}", get(catalog_service::product_detail))
        .route("/api/search", get(search_service::search))
        .route("/api/orders", post(order_service::submit_order))
        .route("/api/newsletter", post(newsletter_service::subscribe))
        .route("/api/revalidate", post(revalidate_service::revalidate))
        .route("/api/health", get(health_service::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixture for handler tests.

    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use gpi_core::rich_text::{RichTextDocument, RichTextNode, FORMAT_BOLD};
    use gpi_core::{Brand, Category, Product};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{AppState, ContentSnapshot, ContentStore, SiteConfig};

    pub const SECRET: &str = "test-secret";

    fn product(id: &str, name: &str, category: &str, price: Decimal, day: u32) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            slug: id.to_string(),
            brand: "Datecs".to_string(),
            model: None,
            short_description: None,
            price,
            category: category.to_string(),
            in_stock: true,
            featured: false,
            created_at: Utc.with_ymd_and_hms(2025, 5, day, 9, 0, 0).unwrap(),
            description: None,
        }
    }

    pub fn snapshot() -> ContentSnapshot {
        let mut printer = product("fp-700", "Фискален принтер FP-700", "14", dec!(49.99), 2);
        printer.featured = true;
        printer.description = Some(RichTextDocument::from_nodes(vec![RichTextNode::element(
            "paragraph",
            vec![RichTextNode::text("Бърз печат", FORMAT_BOLD)],
        )]));

        ContentSnapshot {
            categories: vec![
                Category::new("12", "Касови апарати", "kasovi-aparati"),
                Category::new("14", "Фискални принтери", "fiskalni-printeri"),
                Category::new("20", "Баркод скенери", "barkod-skeneri"),
                Category::new("21", "Ръчни скенери", "rachni-skeneri").with_parent("20"),
            ],
            products: vec![
                product("daisy", "Касов апарат Daisy", "12", dec!(120), 1),
                printer,
                product("scanner", "Баркод скенер", "20", dec!(0), 3),
            ],
            brands: vec![Brand {
                id: "b1".to_string(),
                name: "Datecs".to_string(),
                slug: "datecs".to_string(),
                description: None,
            }],
            ..ContentSnapshot::default()
        }
    }

    pub fn state() -> Arc<AppState> {
        let config = SiteConfig {
            revalidate_secret: Some(SECRET.to_string()),
            ..SiteConfig::default()
        };
        Arc::new(AppState::new(config, ContentStore::new(snapshot())))
    }
}
