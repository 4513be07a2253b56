//! Review repository

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::restaurants::{display_name, RestaurantRepo};
use super::{page_from_rows, DbError};
use crate::models::{Paginated, Pagination, ReviewDraft};

/// Review record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: i64,
    pub restaurant_id: i64,
    pub title: String,
    pub author: String,
    pub profile_image: Option<String>,
    pub content: String,
    pub rating: i16,
    pub social_channel_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn display_name(&self) -> String {
        format!("{}:{}", self.author, self.title)
    }
}

/// Review joined with its restaurant's name, for the changelist
#[derive(Debug, Clone, FromRow)]
pub struct ReviewListRow {
    #[sqlx(flatten)]
    pub review: Review,
    pub restaurant_name: String,
    pub restaurant_branch_name: Option<String>,
}

impl ReviewListRow {
    /// Display name of the reviewed restaurant
    pub fn restaurant_display(&self) -> String {
        display_name(&self.restaurant_name, self.restaurant_branch_name.as_deref())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub restaurant_id: Option<i64>,
}

const COLUMNS: &str = "id, restaurant_id, title, author, profile_image, content, rating, \
    social_channel_id, created_at, updated_at";

pub struct ReviewRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, draft: &ReviewDraft) -> Result<Review, DbError> {
        let review: Review = sqlx::query_as(&format!(
            r#"
            INSERT INTO reviews (restaurant_id, title, author, profile_image, content, rating, social_channel_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(draft.restaurant_id)
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.profile_image)
        .bind(&draft.content)
        .bind(draft.rating)
        .bind(draft.social_channel_id)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(id = review.id, restaurant_id = review.restaurant_id, "Review created");
        Ok(review)
    }

    pub async fn get(&self, id: i64) -> Result<Review, DbError> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM reviews WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("review", id))
    }

    /// Fail with NotFound unless the review exists.
    pub async fn ensure_exists(&self, id: i64) -> Result<(), DbError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reviews WHERE id = $1)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;

        if !exists {
            return Err(DbError::not_found("review", id));
        }
        Ok(())
    }

    /// List reviews newest first, with restaurant names joined in.
    pub async fn list(
        &self,
        filter: &ReviewFilter,
        page: Pagination,
    ) -> Result<Paginated<ReviewListRow>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT rv.id, rv.restaurant_id, rv.title, rv.author, rv.profile_image, rv.content,
                   rv.rating, rv.social_channel_id, rv.created_at, rv.updated_at,
                   r.name AS restaurant_name, r.branch_name AS restaurant_branch_name,
                   COUNT(*) OVER() AS total
            FROM reviews rv
            JOIN restaurants r ON r.id = rv.restaurant_id
            WHERE ($1::bigint IS NULL OR rv.restaurant_id = $1)
            ORDER BY rv.created_at DESC, rv.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.restaurant_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        page_from_rows(rows, page)
    }

    /// Update a review; refreshes `updated_at`.
    pub async fn update(&self, id: i64, draft: &ReviewDraft) -> Result<Review, DbError> {
        sqlx::query_as(&format!(
            r#"
            UPDATE reviews
            SET restaurant_id = $2, title = $3, author = $4, profile_image = $5,
                content = $6, rating = $7, social_channel_id = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(draft.restaurant_id)
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.profile_image)
        .bind(&draft.content)
        .bind(draft.rating)
        .bind(draft.social_channel_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("review", id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("review", id));
        }
        Ok(())
    }

    /// Display name of the restaurant a review belongs to.
    pub async fn restaurant_display(&self, review: &Review) -> Result<String, DbError> {
        let restaurant = RestaurantRepo::new(self.pool).get(review.restaurant_id).await?;
        Ok(restaurant.display_name())
    }
}
