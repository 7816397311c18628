use crate::domain::wish::CreateWishRequest;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

pub async fn list_child_wishes(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    match state.wishes_repo.list_by_child(&child_id).await {
        Ok(wishes) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"child_id": child_id, "wishes": wishes})),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

pub async fn create_wish(
    State(state): State<AppState>,
    Json(req): Json<CreateWishRequest>,
) -> impl IntoResponse {
    if req.item.trim().is_empty() {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "item must not be empty"})),
        )
            .into_response();
    }

    match state.wishes_repo.insert(&req.child_id, req.item.trim()).await {
        Ok(wish) => (axum::http::StatusCode::CREATED, Json(wish)).into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
