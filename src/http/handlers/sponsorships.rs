use crate::domain::sponsorship::CreateSponsorshipRequest;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SponsorshipFilter {
    pub donor_id: Option<String>,
}

pub async fn create_sponsorship(
    State(state): State<AppState>,
    Json(req): Json<CreateSponsorshipRequest>,
) -> impl IntoResponse {
    if req.amount_minor <= 0 {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "amount_minor must be > 0"})),
        )
            .into_response();
    }

    match state.sponsorships_repo.insert(&req).await {
        Ok(sponsorship) => (axum::http::StatusCode::CREATED, Json(sponsorship)).into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

pub async fn list_sponsorships(
    State(state): State<AppState>,
    Query(filter): Query<SponsorshipFilter>,
) -> impl IntoResponse {
    let result = match &filter.donor_id {
        Some(donor_id) => state.sponsorships_repo.list_by_donor(donor_id).await,
        None => state.sponsorships_repo.list_all().await,
    };

    match result {
        Ok(sponsorships) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"sponsorships": sponsorships})),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
