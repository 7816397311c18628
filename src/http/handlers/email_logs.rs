use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

pub async fn list_email_logs(State(state): State<AppState>) -> impl IntoResponse {
    match state.email_log_repo.list_recent(100).await {
        Ok(logs) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"email_logs": logs})),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

pub async fn retry_email_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.email_log_repo.requeue(id).await {
        Ok(true) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"id": id, "requeued": true})),
        )
            .into_response(),
        Ok(false) => (
            axum::http::StatusCode::CONFLICT,
            Json(serde_json::json!({"error": "email log is not in failed state"})),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
