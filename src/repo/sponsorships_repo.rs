use crate::domain::sponsorship::{
    CreateSponsorshipRequest, Sponsorship, SponsorshipFrequency, SponsorshipStatus,
};
use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct SponsorshipsRepo {
    pub pool: PgPool,
}

impl SponsorshipsRepo {
    pub async fn insert(&self, req: &CreateSponsorshipRequest) -> Result<Sponsorship> {
        let id = Uuid::new_v4();
        let row = sqlx::query(
            r#"
            INSERT INTO sponsorships (id, donor_id, orphanage_id, child_id, amount_minor, currency, frequency, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'active')
            RETURNING id, donor_id, orphanage_id, child_id, amount_minor, currency, frequency, status, created_at
            "#,
        )
        .bind(id)
        .bind(&req.donor_id)
        .bind(&req.orphanage_id)
        .bind(&req.child_id)
        .bind(req.amount_minor)
        .bind(&req.currency)
        .bind(req.frequency.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(to_sponsorship(row))
    }

    pub async fn list_by_donor(&self, donor_id: &str) -> Result<Vec<Sponsorship>> {
        let rows = sqlx::query(
            "SELECT id, donor_id, orphanage_id, child_id, amount_minor, currency, frequency, status, created_at FROM sponsorships WHERE donor_id = $1 ORDER BY created_at DESC",
        )
        .bind(donor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(to_sponsorship).collect())
    }

    pub async fn list_all(&self) -> Result<Vec<Sponsorship>> {
        let rows = sqlx::query(
            "SELECT id, donor_id, orphanage_id, child_id, amount_minor, currency, frequency, status, created_at FROM sponsorships ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(to_sponsorship).collect())
    }
}

fn to_sponsorship(r: PgRow) -> Sponsorship {
    Sponsorship {
        id: r.get("id"),
        donor_id: r.get("donor_id"),
        orphanage_id: r.get("orphanage_id"),
        child_id: r.get("child_id"),
        amount_minor: r.get("amount_minor"),
        currency: r.get("currency"),
        frequency: SponsorshipFrequency::parse(r.get::<String, _>("frequency").as_str()),
        status: SponsorshipStatus::parse(r.get::<String, _>("status").as_str()),
        created_at: r.get("created_at"),
    }
}
