use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishStatus {
    Pending,
    InProgress,
    Fulfilled,
}

impl WishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WishStatus::Pending => "pending",
            WishStatus::InProgress => "in_progress",
            WishStatus::Fulfilled => "fulfilled",
        }
    }

    pub fn parse(s: &str) -> WishStatus {
        match s {
            "in_progress" => WishStatus::InProgress,
            "fulfilled" => WishStatus::Fulfilled,
            _ => WishStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Wish {
    pub id: Uuid,
    pub child_id: String,
    pub item: String,
    pub status: WishStatus,
    pub donor_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWishRequest {
    pub child_id: String,
    pub item: String,
}
