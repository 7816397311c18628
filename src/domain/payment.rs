use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPurpose {
    Donation,
    Sponsorship,
    Wish,
}

impl PaymentPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentPurpose::Donation => "donation",
            PaymentPurpose::Sponsorship => "sponsorship",
            PaymentPurpose::Wish => "wish",
        }
    }

    pub fn parse(s: &str) -> PaymentPurpose {
        match s {
            "sponsorship" => PaymentPurpose::Sponsorship,
            "wish" => PaymentPurpose::Wish,
            _ => PaymentPurpose::Donation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Successful,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Successful => "successful",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> PaymentStatus {
        match s {
            "pending" => PaymentStatus::Pending,
            "successful" => PaymentStatus::Successful,
            _ => PaymentStatus::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DonationRequest {
    pub amount_minor: i64,
    pub currency: String,
    pub donor_id: String,
    pub donor_email: String,
    pub orphanage_id: String,
    #[serde(default)]
    pub child_id: Option<String>,
    pub purpose: PaymentPurpose,
    pub callback_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub payment_id: Uuid,
    pub amount_minor: i64,
    pub currency: String,
    pub donor_id: String,
    pub orphanage_id: String,
    pub child_id: Option<String>,
    pub purpose: PaymentPurpose,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub payment_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub transaction_id: String,
}

#[derive(Debug, Serialize)]
pub struct ConfirmPaymentResponse {
    pub payment_id: Uuid,
    pub confirmed: bool,
    pub status: PaymentStatus,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_store_encoding() {
        for status in [PaymentStatus::Pending, PaymentStatus::Successful, PaymentStatus::Failed] {
            assert_eq!(PaymentStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_string_parses_as_failed() {
        assert_eq!(PaymentStatus::parse("refunded"), PaymentStatus::Failed);
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(PaymentStatus::Successful.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
    }

    #[test]
    fn donation_request_accepts_missing_child() {
        let req: DonationRequest = serde_json::from_value(serde_json::json!({
            "amount_minor": 50,
            "currency": "XAF",
            "donor_id": "d1",
            "donor_email": "d1@example.org",
            "orphanage_id": "o1",
            "purpose": "donation",
            "callback_url": "https://hopebridge.example/donate/complete"
        }))
        .unwrap();
        assert!(req.child_id.is_none());
        assert_eq!(req.purpose, PaymentPurpose::Donation);
    }
}
