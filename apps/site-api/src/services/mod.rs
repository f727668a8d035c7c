//! HTTP route handlers.
//!
//! One module per website feature. Handlers take `State<Arc<AppState>>`
//! and return `ApiResult<Json<_>>`.

pub mod catalog_service;
pub mod health_service;
pub mod newsletter_service;
pub mod order_service;
pub mod revalidate_service;
pub mod search_service;

use gpi_core::pricing::{format_price, CurrencyDisplaySettings, PriceDisplay};
use gpi_core::{Product, SiteSettings};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::error::{ApiError, ApiResult};

/// Body of successful form submissions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: &str) -> Self {
        MessageResponse {
            success: true,
            message: message.to_string(),
        }
    }
}

/// A product as shown on cards and in lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub brand: String,
    pub model: Option<String>,
    pub short_description: Option<String>,
    pub category: String,
    pub in_stock: bool,
    pub featured: bool,
    pub price: PriceDisplay,
}

impl ProductSummary {
    pub fn build(product: &Product, settings: CurrencyDisplaySettings) -> ApiResult<Self> {
        Ok(ProductSummary {
            id: product.id.clone(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            brand: product.brand.clone(),
            model: product.model.clone(),
            short_description: product.short_description.clone(),
            category: product.category.clone(),
            in_stock: product.in_stock,
            featured: product.featured,
            price: format_price(product.price, settings)?,
        })
    }
}

/// Per-request currency settings: site settings first, then the
/// environment defaults.
pub fn currency_settings(
    config: &SiteConfig,
    site: &SiteSettings,
) -> ApiResult<CurrencyDisplaySettings> {
    Ok(CurrencyDisplaySettings::from_site_fields(
        site.eur_to_bgn_rate.or(Some(config.eur_to_bgn_rate)),
        site.show_bgn_price.or(Some(config.show_bgn_price)),
    )?)
}

/// Serializes a response body for the cache.
pub(crate) fn to_cached_value<T: Serialize>(body: &T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize response");
        ApiError::internal()
    })
}
