//! Review image repository

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::{reviews::ReviewRepo, DbError};
use crate::models::ReviewImageDraft;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewImage {
    pub id: i64,
    pub review_id: i64,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, review_id, name, image, created_at, updated_at";

pub struct ReviewImageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewImageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for(&self, review_id: i64) -> Result<Vec<ReviewImage>, DbError> {
        let rows = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM review_images WHERE review_id = $1 ORDER BY id"
        ))
        .bind(review_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, review_id: i64, draft: &ReviewImageDraft) -> Result<ReviewImage, DbError> {
        ReviewRepo::new(self.pool).ensure_exists(review_id).await?;

        let image = sqlx::query_as(&format!(
            r#"
            INSERT INTO review_images (review_id, name, image)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(review_id)
        .bind(&draft.name)
        .bind(&draft.image)
        .fetch_one(self.pool)
        .await?;

        Ok(image)
    }

    /// Update an image; refreshes `updated_at`.
    pub async fn update(
        &self,
        review_id: i64,
        id: i64,
        draft: &ReviewImageDraft,
    ) -> Result<ReviewImage, DbError> {
        sqlx::query_as(&format!(
            r#"
            UPDATE review_images
            SET name = $3, image = $4, updated_at = NOW()
            WHERE id = $1 AND review_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(review_id)
        .bind(&draft.name)
        .bind(&draft.image)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("review image", id))
    }

    pub async fn delete(&self, review_id: i64, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM review_images WHERE id = $1 AND review_id = $2")
            .bind(id)
            .bind(review_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("review image", id));
        }
        Ok(())
    }
}
