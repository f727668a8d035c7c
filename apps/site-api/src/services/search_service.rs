//! Header search suggestions.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use gpi_core::pricing::{format_price, PriceDisplay};
use gpi_core::search::{search_products, SearchHit};
use gpi_core::validation::validate_search_query;
use serde::{Deserialize, Serialize};

use super::currency_settings;
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub hit: SearchHit,
    pub price_display: PriceDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub products: Vec<SearchResult>,
}

/// `GET /api/search?q=`
///
/// Missing or short queries answer with an empty list, not an error.
pub async fn search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Query(params) = query?;
    let query = validate_search_query(params.q.as_deref().unwrap_or(""))?;

    let snapshot = state.store.read().await;
    let settings = currency_settings(&state.config, &snapshot.site_settings)?;

    let products = search_products(&snapshot.products, &query, state.config.search_result_limit)
        .into_iter()
        .map(|hit| -> ApiResult<SearchResult> {
            Ok(SearchResult {
                price_display: format_price(hit.price, settings)?,
                hit,
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;

    tracing::debug!(query = %query, hits = products.len(), "Search");
    Ok(Json(SearchResponse { products }))
}
