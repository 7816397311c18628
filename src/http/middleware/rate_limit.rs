use crate::domain::payment::{ErrorEnvelope, ErrorPayload};
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use redis::AsyncCommands;

#[derive(Clone)]
pub struct DonationRateLimit {
    pub redis_client: redis::Client,
    pub max_per_minute: i64,
}

pub fn client_ip(forwarded_for: Option<&str>) -> &str {
    forwarded_for
        .unwrap_or("unknown")
        .split(',')
        .next()
        .unwrap_or("unknown")
        .trim()
}

pub fn window_key(ip: &str, minute: &str) -> String {
    format!("donations:rate:{}:{}", ip, minute)
}

/// Per-IP fixed-window counter over the donation surface. Fails open when
/// redis is down so a cache outage cannot take the donation flow with it.
pub async fn enforce(
    State(state): State<DonationRateLimit>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok());
    let minute = chrono::Utc::now().format("%Y%m%d%H%M").to_string();
    let key = window_key(client_ip(forwarded), &minute);

    if let Ok(mut conn) = state.redis_client.get_multiplexed_async_connection().await {
        let count: i64 = conn.incr(&key, 1).await.unwrap_or(1);
        let _: bool = conn.expire(&key, 120).await.unwrap_or(false);
        if count > state.max_per_minute {
            let body = ErrorEnvelope {
                error: ErrorPayload {
                    code: "RATE_LIMITED".to_string(),
                    message: "too many requests from this address".to_string(),
                    details: None,
                },
            };
            return (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
        }
    }

    next.run(request).await
}
