//! Liveness endpoint for monitoring.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub server_time: String,
    pub categories: usize,
    pub products: usize,
    pub cached_responses: usize,
}

/// `GET /api/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (categories, products) = {
        let snapshot = state.store.read().await;
        (snapshot.categories.len(), snapshot.products.len())
    };

    Json(HealthResponse {
        status: "ok",
        server_time: Utc::now().to_rfc3339(),
        categories,
        products,
        cached_responses: state.cache.len().await,
    })
}
