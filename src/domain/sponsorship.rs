use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SponsorshipFrequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl SponsorshipFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            SponsorshipFrequency::Monthly => "monthly",
            SponsorshipFrequency::Quarterly => "quarterly",
            SponsorshipFrequency::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> SponsorshipFrequency {
        match s {
            "quarterly" => SponsorshipFrequency::Quarterly,
            "yearly" => SponsorshipFrequency::Yearly,
            _ => SponsorshipFrequency::Monthly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SponsorshipStatus {
    Active,
    Cancelled,
}

impl SponsorshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SponsorshipStatus::Active => "active",
            SponsorshipStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> SponsorshipStatus {
        match s {
            "cancelled" => SponsorshipStatus::Cancelled,
            _ => SponsorshipStatus::Active,
        }
    }
}

/// Recurring-donation commitment. Created independently of the payment flow;
/// shares donor/orphanage ids with payments but carries no lifecycle linkage.
#[derive(Debug, Clone, Serialize)]
pub struct Sponsorship {
    pub id: Uuid,
    pub donor_id: String,
    pub orphanage_id: String,
    pub child_id: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
    pub frequency: SponsorshipFrequency,
    pub status: SponsorshipStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSponsorshipRequest {
    pub donor_id: String,
    pub orphanage_id: String,
    #[serde(default)]
    pub child_id: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
    pub frequency: SponsorshipFrequency,
}
