use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod notchpay;
pub mod stripe;

#[derive(Debug, Clone)]
pub struct InitiateRequest {
    pub reference: String,
    pub amount_minor: i64,
    pub currency: String,
    pub customer_email: String,
    pub callback_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateOutcome {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub payment_url: Option<String>,
    pub message: String,
}

#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    /// Store/network errors propagate out of `initiate`.
    async fn initiate(&self, request: InitiateRequest) -> Result<InitiateOutcome>;

    /// "not found" and "rejected" are both `false`; internal errors are
    /// logged and converted to `false`.
    async fn verify(&self, transaction_id: &str) -> bool;
}

/// Timestamp-based gateway reference. Not unique under concurrent
/// submission; two rapid calls can collide (kept from the source design).
pub fn build_reference(now_millis: i64) -> String {
    format!("tx-{}", now_millis)
}

pub fn redirect_url(callback_url: &str, transaction_id: &str) -> String {
    let sep = if callback_url.contains('?') { '&' } else { '?' };
    format!("{}{}transaction_id={}", callback_url, sep, transaction_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_embeds_timestamp() {
        assert_eq!(build_reference(1700000000123), "tx-1700000000123");
    }

    #[test]
    fn redirect_url_appends_query_parameter() {
        assert_eq!(
            redirect_url("https://hopebridge.example/donate/complete", "tx-1"),
            "https://hopebridge.example/donate/complete?transaction_id=tx-1"
        );
    }

    #[test]
    fn redirect_url_respects_existing_query() {
        assert_eq!(
            redirect_url("https://hopebridge.example/donate?lang=fr", "tx-1"),
            "https://hopebridge.example/donate?lang=fr&transaction_id=tx-1"
        );
    }
}
