use crate::domain::transaction::{Transaction, TransactionStatus};
use anyhow::Result;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct TransactionsRepo {
    pub pool: PgPool,
}

impl TransactionsRepo {
    pub async fn insert(
        &self,
        id: &str,
        amount_minor: i64,
        currency: &str,
        customer_email: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, amount_minor, currency, customer_email, status)
            VALUES ($1, $2, $3, $4, 'pending')
            "#,
        )
        .bind(id)
        .bind(amount_minor)
        .bind(currency)
        .bind(customer_email)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>> {
        let row = sqlx::query(
            "SELECT id, amount_minor, currency, customer_email, status, created_at, completed_at FROM transactions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Transaction {
            id: r.get("id"),
            amount_minor: r.get("amount_minor"),
            currency: r.get("currency"),
            customer_email: r.get("customer_email"),
            status: TransactionStatus::parse(r.get::<String, _>("status").as_str()),
            created_at: r.get("created_at"),
            completed_at: r.get("completed_at"),
        }))
    }

    pub async fn mark_completed(&self, id: &str) -> Result<()> {
        sqlx::query("UPDATE transactions SET status = 'completed', completed_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
