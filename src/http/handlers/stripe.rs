use crate::domain::payment::PaymentStatus;
use crate::gateways::stripe::StripeEvent;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    pub amount_minor: i64,
    pub currency: String,
}

pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(req): Json<CreatePaymentIntentRequest>,
) -> impl IntoResponse {
    if req.amount_minor <= 0 {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "amount_minor must be > 0"})),
        )
            .into_response();
    }

    match state.stripe.create_payment_intent(req.amount_minor, &req.currency).await {
        Ok(client_secret) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"client_secret": client_secret})),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

/// Genuine Stripe event delivery. Runs beside, not inside, the donor
/// confirmation flow; a matching payment row is updated when one exists.
pub async fn webhook(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let event = match state.stripe.parse_webhook(&body, signature) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("stripe webhook rejected: {}", e);
            return (
                axum::http::StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "invalid webhook"})),
            )
                .into_response();
        }
    };

    let (intent_id, status) = match event {
        StripeEvent::PaymentSucceeded { intent_id } => (intent_id, PaymentStatus::Successful),
        StripeEvent::PaymentFailed { intent_id } => (intent_id, PaymentStatus::Failed),
        StripeEvent::Ignored { event_type } => {
            tracing::debug!("ignoring stripe event type {}", event_type);
            return (axum::http::StatusCode::OK, Json(serde_json::json!({"received": true})))
                .into_response();
        }
    };

    match state.payments_repo.find_by_transaction_id(&intent_id).await {
        Ok(Some(payment)) => {
            if let Err(e) = state
                .payments_repo
                .set_status_if_pending(payment.payment_id, status)
                .await
            {
                tracing::error!("failed to apply stripe event for {}: {}", intent_id, e);
                return (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "event not applied"})),
                )
                    .into_response();
            }
        }
        Ok(None) => {
            tracing::info!("stripe event for unknown intent {}", intent_id);
        }
        Err(e) => {
            tracing::error!("payment lookup failed for {}: {}", intent_id, e);
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "event not applied"})),
            )
                .into_response();
        }
    }

    (axum::http::StatusCode::OK, Json(serde_json::json!({"received": true}))).into_response()
}
