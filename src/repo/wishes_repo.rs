use crate::domain::wish::{Wish, WishStatus};
use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct WishesRepo {
    pub pool: PgPool,
}

impl WishesRepo {
    pub async fn insert(&self, child_id: &str, item: &str) -> Result<Wish> {
        let id = Uuid::new_v4();
        let row = sqlx::query(
            r#"
            INSERT INTO wishes (id, child_id, item, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING id, child_id, item, status, donor_id, created_at
            "#,
        )
        .bind(id)
        .bind(child_id)
        .bind(item)
        .fetch_one(&self.pool)
        .await?;

        Ok(to_wish(row))
    }

    pub async fn list_by_child(&self, child_id: &str) -> Result<Vec<Wish>> {
        let rows = sqlx::query(
            "SELECT id, child_id, item, status, donor_id, created_at FROM wishes WHERE child_id = $1 ORDER BY created_at ASC",
        )
        .bind(child_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(to_wish).collect())
    }

    pub async fn advance_to_in_progress(&self, wish_id: Uuid, donor_id: &str) -> Result<()> {
        sqlx::query(
            "UPDATE wishes SET status = 'in_progress', donor_id = $2, updated_at = now() WHERE id = $1",
        )
        .bind(wish_id)
        .bind(donor_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn to_wish(r: PgRow) -> Wish {
    Wish {
        id: r.get("id"),
        child_id: r.get("child_id"),
        item: r.get("item"),
        status: WishStatus::parse(r.get::<String, _>("status").as_str()),
        donor_id: r.get("donor_id"),
        created_at: r.get("created_at"),
    }
}
