//! Cache revalidation hook called by the CMS after content changes.
//!
//! ## Request
//! ```text
//! POST /api/revalidate
//! x-revalidate-secret: <REVALIDATE_SECRET>
//!
//! { "paths": ["/", "products/daisy-compact-s"] }
//! ```
//! The secret is checked before the body is looked at.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use gpi_core::validation::sanitize_revalidate_paths;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub const SECRET_HEADER: &str = "x-revalidate-secret";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevalidateResponse {
    pub revalidated: Vec<String>,
}

/// `POST /api/revalidate`
pub async fn revalidate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<RevalidateResponse>> {
    let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
    match (state.config.revalidate_secret.as_deref(), provided) {
        (Some(expected), Some(provided)) if expected == provided => {}
        _ => {
            warn!("Revalidation rejected: invalid secret");
            return Err(ApiError::unauthorized("Invalid secret"));
        }
    }

    let Json(body) = body?;
    // Anything but an array of strings counts as no paths.
    let raw: Vec<&str> = body
        .get("paths")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let paths = sanitize_revalidate_paths(raw);
    if paths.is_empty() {
        return Err(ApiError::invalid_request("No paths to revalidate"));
    }

    for path in &paths {
        let evicted = state.cache.evict(path).await;
        info!(path = %path, evicted, "Path revalidated");
    }

    Ok(Json(RevalidateResponse { revalidated: paths }))
}
