//! Newsletter signup from the site footer.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use gpi_core::validation::validate_email;
use serde::Deserialize;
use tracing::info;

use super::MessageResponse;
use crate::error::{ApiError, ApiResult};
use crate::store::SubscribeOutcome;
use crate::AppState;

pub const SUBSCRIBED_MESSAGE: &str = "Благодарим ви! Успешно се абонирахте за нашия бюлетин.";
pub const ALREADY_SUBSCRIBED_MESSAGE: &str = "Този имейл адрес вече е абониран";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// `POST /api/newsletter`
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewsletterRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = body?;
    let email = validate_email(request.email.as_deref().unwrap_or(""))?;

    match state.store.subscribe(&email, Utc::now()).await {
        SubscribeOutcome::AlreadySubscribed => Err(ApiError::conflict(ALREADY_SUBSCRIBED_MESSAGE)),
        outcome => {
            info!(?outcome, "Newsletter signup");
            Ok(Json(MessageResponse::success(SUBSCRIBED_MESSAGE)))
        }
    }
}
