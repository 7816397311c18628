use crate::domain::payment::{ConfirmPaymentRequest, DonationRequest};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

pub async fn create_donation(
    State(state): State<AppState>,
    Json(req): Json<DonationRequest>,
) -> impl IntoResponse {
    match state.donor_service.make_payment(req).await {
        Ok(payment) => (axum::http::StatusCode::CREATED, Json(payment)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn confirm_donation(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    Json(req): Json<ConfirmPaymentRequest>,
) -> impl IntoResponse {
    match state
        .donor_service
        .confirm_payment(payment_id, &req.transaction_id)
        .await
    {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn get_donation(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.payments_repo.find_by_id(payment_id).await {
        Ok(Some(payment)) => (axum::http::StatusCode::OK, Json(payment)).into_response(),
        Ok(None) => (
            axum::http::StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "payment not found"})),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
