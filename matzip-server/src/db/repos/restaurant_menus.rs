//! Restaurant menu repository

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::{restaurants::RestaurantRepo, DbError};
use crate::models::RestaurantMenuDraft;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RestaurantMenu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub price: i32,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, restaurant_id, name, price, image, created_at, updated_at";

pub struct RestaurantMenuRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RestaurantMenuRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for(&self, restaurant_id: i64) -> Result<Vec<RestaurantMenu>, DbError> {
        let rows = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM restaurant_menus WHERE restaurant_id = $1 ORDER BY id"
        ))
        .bind(restaurant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get(&self, restaurant_id: i64, id: i64) -> Result<RestaurantMenu, DbError> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM restaurant_menus WHERE id = $1 AND restaurant_id = $2"
        ))
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("restaurant menu", id))
    }

    pub async fn create(
        &self,
        restaurant_id: i64,
        draft: &RestaurantMenuDraft,
    ) -> Result<RestaurantMenu, DbError> {
        // Report a missing parent as NotFound rather than an FK violation
        RestaurantRepo::new(self.pool).ensure_exists(restaurant_id).await?;

        let menu = sqlx::query_as(&format!(
            r#"
            INSERT INTO restaurant_menus (restaurant_id, name, price, image)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(restaurant_id)
        .bind(&draft.name)
        .bind(draft.price)
        .bind(&draft.image)
        .fetch_one(self.pool)
        .await?;

        Ok(menu)
    }

    /// Update a menu item; refreshes `updated_at`.
    pub async fn update(
        &self,
        restaurant_id: i64,
        id: i64,
        draft: &RestaurantMenuDraft,
    ) -> Result<RestaurantMenu, DbError> {
        sqlx::query_as(&format!(
            r#"
            UPDATE restaurant_menus
            SET name = $3, price = $4, image = $5, updated_at = NOW()
            WHERE id = $1 AND restaurant_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(restaurant_id)
        .bind(&draft.name)
        .bind(draft.price)
        .bind(&draft.image)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("restaurant menu", id))
    }

    pub async fn delete(&self, restaurant_id: i64, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM restaurant_menus WHERE id = $1 AND restaurant_id = $2")
            .bind(id)
            .bind(restaurant_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("restaurant menu", id));
        }
        Ok(())
    }
}
