//! Inquiry (order) form submission.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use gpi_core::validation::{validate_inquiry, InquirySubmission};
use tracing::info;

use super::MessageResponse;
use crate::error::ApiResult;
use crate::AppState;

pub const ORDER_RECEIVED_MESSAGE: &str =
    "Благодарим ви за запитването! Ще се свържем с вас скоро.";

/// `POST /api/orders`
pub async fn submit_order(
    State(state): State<Arc<AppState>>,
    body: Result<Json<InquirySubmission>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(submission) = body?;
    let inquiry = validate_inquiry(&submission)?;

    let record = state.store.create_inquiry(inquiry, Utc::now()).await;
    info!(
        inquiry_id = %record.id,
        product = record.product.as_deref().unwrap_or("-"),
        "Inquiry received"
    );

    Ok(Json(MessageResponse::success(ORDER_RECEIVED_MESSAGE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support;
    use gpi_core::InquiryStatus;

    fn submission() -> InquirySubmission {
        InquirySubmission {
            full_name: Some("Мария Иванова".to_string()),
            company: Some("Магазин ООД".to_string()),
            phone: Some("0888 123 456".to_string()),
            email: Some(" maria@magazin.bg ".to_string()),
            product: Some("Касов апарат Daisy".to_string()),
            product_url: Some("/products/daisy".to_string()),
            additional_info: Some("".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_order_stores_new_inquiry() {
        let state = test_support::state();
        let Json(response) = submit_order(State(state.clone()), Ok(Json(submission())))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.message, ORDER_RECEIVED_MESSAGE);

        let snapshot = state.store.read().await;
        let inquiry = &snapshot.inquiries[0];
        assert_eq!(inquiry.status, InquiryStatus::New);
        assert_eq!(inquiry.email, "maria@magazin.bg");
        assert_eq!(inquiry.additional_info, None);
    }

    #[tokio::test]
    async fn test_missing_company_rejected() {
        let state = test_support::state();
        let mut input = submission();
        input.company = Some("   ".to_string());

        let err = submit_order(State(state.clone()), Ok(Json(input)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Моля, въведете име на фирмата");
        assert!(state.store.read().await.inquiries.is_empty());
    }
}
