use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> TransactionStatus {
        match s {
            "completed" => TransactionStatus::Completed,
            _ => TransactionStatus::Pending,
        }
    }
}

/// Gateway-side record of a payment attempt, distinct from the application
/// Payment. Created at initiation, flipped to completed by verification,
/// never deleted.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub customer_email: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
