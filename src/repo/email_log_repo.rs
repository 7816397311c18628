use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Row};

#[derive(Debug, Clone, Serialize)]
pub struct EmailLog {
    pub id: i64,
    pub recipient: String,
    pub subject: String,
    pub html: String,
    pub status: String,
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct EmailLogRepo {
    pub pool: PgPool,
}

impl EmailLogRepo {
    pub async fn enqueue(&self, recipient: &str, subject: &str, html: &str) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO email_logs (recipient, subject, html, status, attempts, next_attempt_at)
            VALUES ($1, $2, $3, 'pending', 0, now())
            RETURNING id
            "#,
        )
        .bind(recipient)
        .bind(subject)
        .bind(html)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    pub async fn lock_pending(&self, batch_size: i64) -> Result<Vec<EmailLog>> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query(
            r#"
            SELECT id, recipient, subject, html, status, attempts, created_at
            FROM email_logs
            WHERE status = 'pending' AND next_attempt_at <= now()
            ORDER BY id ASC
            LIMIT $1
            FOR UPDATE SKIP LOCKED
            "#,
        )
        .bind(batch_size)
        .fetch_all(tx.as_mut())
        .await?;

        if rows.is_empty() {
            tx.rollback().await?;
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.get("id")).collect();
        sqlx::query("UPDATE email_logs SET status = 'sending', updated_at = now() WHERE id = ANY($1)")
            .bind(&ids)
            .execute(tx.as_mut())
            .await?;

        tx.commit().await?;

        Ok(rows
            .into_iter()
            .map(|r| EmailLog {
                id: r.get("id"),
                recipient: r.get("recipient"),
                subject: r.get("subject"),
                html: r.get("html"),
                status: r.get("status"),
                attempts: r.get("attempts"),
                created_at: r.get("created_at"),
            })
            .collect())
    }

    pub async fn mark_sent(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE email_logs SET status = 'sent', updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn mark_retry(&self, id: i64, attempts: i32, next_attempt_at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            "UPDATE email_logs SET status = 'pending', attempts = $2, next_attempt_at = $3, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(attempts)
        .bind(next_attempt_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn mark_failed(&self, id: i64, attempts: i32) -> Result<()> {
        sqlx::query("UPDATE email_logs SET status = 'failed', attempts = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(attempts)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn requeue(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE email_logs SET status = 'pending', next_attempt_at = now(), updated_at = now() WHERE id = $1 AND status = 'failed'",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_recent(&self, limit: i64) -> Result<Vec<EmailLog>> {
        let rows = sqlx::query(
            "SELECT id, recipient, subject, html, status, attempts, created_at FROM email_logs ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| EmailLog {
                id: r.get("id"),
                recipient: r.get("recipient"),
                subject: r.get("subject"),
                html: r.get("html"),
                status: r.get("status"),
                attempts: r.get("attempts"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
