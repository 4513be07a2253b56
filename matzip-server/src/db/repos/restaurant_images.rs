//! Restaurant image repository
//!
//! Writes lock the owning restaurant row, then check the representative
//! flag against the images already flagged. The partial unique index on
//! `restaurant_images` catches any writer that skips this path.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use super::{restaurants, DbError};
use crate::models::{ensure_single_representative, RestaurantImageDraft};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RestaurantImage {
    pub id: i64,
    pub restaurant_id: i64,
    pub is_representative: bool,
    pub display_order: Option<i32>,
    pub name: Option<String>,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str =
    "id, restaurant_id, is_representative, display_order, name, image, created_at, updated_at";

pub struct RestaurantImageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RestaurantImageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Images of a restaurant; explicit display order first, then insertion.
    pub async fn list_for(&self, restaurant_id: i64) -> Result<Vec<RestaurantImage>, DbError> {
        let rows = sqlx::query_as(&format!(
            r#"
            SELECT {COLUMNS}
            FROM restaurant_images
            WHERE restaurant_id = $1
            ORDER BY display_order ASC NULLS LAST, id ASC
            "#
        ))
        .bind(restaurant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get(&self, restaurant_id: i64, id: i64) -> Result<RestaurantImage, DbError> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM restaurant_images WHERE id = $1 AND restaurant_id = $2"
        ))
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("restaurant image", id))
    }

    pub async fn create(
        &self,
        restaurant_id: i64,
        draft: &RestaurantImageDraft,
    ) -> Result<RestaurantImage, DbError> {
        let mut tx = self.pool.begin().await?;

        restaurants::lock(&mut tx, restaurant_id).await?;
        let flagged = flagged_ids(&mut tx, restaurant_id).await?;
        ensure_single_representative(None, draft.is_representative, &flagged)?;

        let image: RestaurantImage = sqlx::query_as(&format!(
            r#"
            INSERT INTO restaurant_images (restaurant_id, is_representative, display_order, name, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(restaurant_id)
        .bind(draft.is_representative)
        .bind(draft.display_order)
        .bind(&draft.name)
        .bind(&draft.image)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(restaurant_id, id = image.id, "Restaurant image created");
        Ok(image)
    }

    /// Update an image; refreshes `updated_at`.
    pub async fn update(
        &self,
        restaurant_id: i64,
        id: i64,
        draft: &RestaurantImageDraft,
    ) -> Result<RestaurantImage, DbError> {
        let mut tx = self.pool.begin().await?;

        restaurants::lock(&mut tx, restaurant_id).await?;
        // an image of another restaurant is not found here, whatever its flag
        sqlx::query_scalar::<_, i64>(
            "SELECT id FROM restaurant_images WHERE id = $1 AND restaurant_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("restaurant image", id))?;

        let flagged = flagged_ids(&mut tx, restaurant_id).await?;
        ensure_single_representative(Some(id), draft.is_representative, &flagged)?;

        let image: RestaurantImage = sqlx::query_as(&format!(
            r#"
            UPDATE restaurant_images
            SET is_representative = $3, display_order = $4, name = $5, image = $6,
                updated_at = NOW()
            WHERE id = $1 AND restaurant_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(restaurant_id)
        .bind(draft.is_representative)
        .bind(draft.display_order)
        .bind(&draft.name)
        .bind(&draft.image)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("restaurant image", id))?;

        tx.commit().await?;
        Ok(image)
    }

    pub async fn delete(&self, restaurant_id: i64, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM restaurant_images WHERE id = $1 AND restaurant_id = $2")
            .bind(id)
            .bind(restaurant_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("restaurant image", id));
        }
        Ok(())
    }
}

async fn flagged_ids(
    tx: &mut Transaction<'_, Postgres>,
    restaurant_id: i64,
) -> Result<Vec<i64>, DbError> {
    let ids = sqlx::query_scalar(
        "SELECT id FROM restaurant_images WHERE restaurant_id = $1 AND is_representative",
    )
    .bind(restaurant_id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(ids)
}
