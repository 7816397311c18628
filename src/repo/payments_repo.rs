use crate::domain::payment::{Payment, PaymentPurpose, PaymentStatus};
use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentsRepo {
    pub pool: PgPool,
}

impl PaymentsRepo {
    pub async fn insert(&self, payment: &Payment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id, amount_minor, currency, donor_id, orphanage_id, child_id,
                purpose, status, transaction_id, payment_url, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(payment.payment_id)
        .bind(payment.amount_minor)
        .bind(&payment.currency)
        .bind(&payment.donor_id)
        .bind(&payment.orphanage_id)
        .bind(&payment.child_id)
        .bind(payment.purpose.as_str())
        .bind(payment.status.as_str())
        .bind(&payment.transaction_id)
        .bind(&payment.payment_url)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>> {
        let row = sqlx::query(
            "SELECT payment_id, amount_minor, currency, donor_id, orphanage_id, child_id, purpose, status, transaction_id, payment_url, created_at FROM payments WHERE payment_id = $1",
        )
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(to_payment))
    }

    pub async fn find_by_transaction_id(&self, transaction_id: &str) -> Result<Option<Payment>> {
        let row = sqlx::query(
            "SELECT payment_id, amount_minor, currency, donor_id, orphanage_id, child_id, purpose, status, transaction_id, payment_url, created_at FROM payments WHERE transaction_id = $1",
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(to_payment))
    }

    /// Pending is the only mutable state; terminal rows are left untouched.
    /// Returns whether a row was actually updated.
    pub async fn set_status_if_pending(&self, payment_id: Uuid, status: PaymentStatus) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE payments SET status = $2, updated_at = now() WHERE payment_id = $1 AND status = 'pending'",
        )
        .bind(payment_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn to_payment(r: PgRow) -> Payment {
    Payment {
        payment_id: r.get("payment_id"),
        amount_minor: r.get("amount_minor"),
        currency: r.get("currency"),
        donor_id: r.get("donor_id"),
        orphanage_id: r.get("orphanage_id"),
        child_id: r.get("child_id"),
        purpose: PaymentPurpose::parse(r.get::<String, _>("purpose").as_str()),
        status: PaymentStatus::parse(r.get::<String, _>("status").as_str()),
        transaction_id: r.get("transaction_id"),
        payment_url: r.get("payment_url"),
        created_at: r.get("created_at"),
    }
}
