use crate::domain::payment::{ErrorEnvelope, ErrorPayload};
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub fn key_matches(provided: Option<&str>, expected: &str) -> bool {
    provided.is_some_and(|p| !expected.is_empty() && p == expected)
}

/// Guard for the `/admin` subtree (email log inspection, wish registration).
pub async fn require_internal_api_key(
    State(expected): State<String>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get("X-Internal-Api-Key")
        .and_then(|h| h.to_str().ok());

    if !key_matches(provided, &expected) {
        let body = ErrorEnvelope {
            error: ErrorPayload {
                code: "UNAUTHORIZED".to_string(),
                message: "missing or invalid X-Internal-Api-Key".to_string(),
                details: None,
            },
        };
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_key_is_accepted() {
        assert!(key_matches(Some("dev-internal-key"), "dev-internal-key"));
    }

    #[test]
    fn missing_or_wrong_key_is_rejected() {
        assert!(!key_matches(None, "dev-internal-key"));
        assert!(!key_matches(Some("guess"), "dev-internal-key"));
    }

    #[test]
    fn empty_expected_key_never_authorizes() {
        assert!(!key_matches(Some(""), ""));
    }
}
