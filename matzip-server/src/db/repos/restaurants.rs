//! Restaurant repository
//!
//! Handles restaurant CRUD with:
//! - Restaurant row + tag links written in one transaction
//! - Search on name/branch name, filter by tag
//! - Rating aggregate maintained separately from the form

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use super::{page_from_rows, search_pattern, DbError, Named};
use crate::models::{Paginated, Pagination, RatingDraft, RestaurantDraft};

/// Restaurant record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub branch_name: Option<String>,
    pub description: Option<String>,
    pub address: String,
    pub feature: Option<String>,
    pub is_closed: bool,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub phone: String,
    pub rating: Decimal,
    pub rating_count: i32,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub last_order_time: Option<NaiveTime>,
    pub category_id: Option<i64>,
    pub region_id: Option<i64>,
}

impl Restaurant {
    pub fn display_name(&self) -> String {
        display_name(&self.name, self.branch_name.as_deref())
    }
}

/// Restaurant name with its branch appended directly, e.g. `을지면옥본점`.
pub fn display_name(name: &str, branch_name: Option<&str>) -> String {
    format!("{}{}", name, branch_name.unwrap_or_default())
}

#[derive(Debug, Clone, Default)]
pub struct RestaurantFilter {
    pub q: Option<String>,
    pub tag_id: Option<i64>,
}

const COLUMNS: &str = "id, name, branch_name, description, address, feature, is_closed, \
    latitude, longitude, phone, rating, rating_count, start_time, end_time, last_order_time, \
    category_id, region_id";

pub struct RestaurantRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RestaurantRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a restaurant and link its tags (atomic).
    pub async fn create(&self, draft: &RestaurantDraft) -> Result<Restaurant, DbError> {
        let mut tx = self.pool.begin().await?;

        let restaurant: Restaurant = sqlx::query_as(&format!(
            r#"
            INSERT INTO restaurants (
                name, branch_name, description, address, feature, is_closed,
                latitude, longitude, phone, start_time, end_time, last_order_time,
                category_id, region_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&draft.name)
        .bind(&draft.branch_name)
        .bind(&draft.description)
        .bind(&draft.address)
        .bind(&draft.feature)
        .bind(draft.is_closed)
        .bind(draft.latitude)
        .bind(draft.longitude)
        .bind(&draft.phone)
        .bind(draft.start_time)
        .bind(draft.end_time)
        .bind(draft.last_order_time)
        .bind(draft.category_id)
        .bind(draft.region_id)
        .fetch_one(&mut *tx)
        .await?;

        replace_tags(&mut tx, restaurant.id, &draft.tag_ids).await?;

        tx.commit().await?;
        tracing::debug!(id = restaurant.id, tags = draft.tag_ids.len(), "Restaurant created");
        Ok(restaurant)
    }

    pub async fn get(&self, id: i64) -> Result<Restaurant, DbError> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM restaurants WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("restaurant", id))
    }

    /// Fail with NotFound unless the restaurant exists.
    pub async fn ensure_exists(&self, id: i64) -> Result<(), DbError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = $1)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;

        if !exists {
            return Err(DbError::not_found("restaurant", id));
        }
        Ok(())
    }

    /// Tags attached to a restaurant, by name.
    pub async fn tags(&self, id: i64) -> Result<Vec<Named>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT t.id, t.name
            FROM tags t
            JOIN restaurant_tags rt ON rt.tag_id = t.id
            WHERE rt.restaurant_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List restaurants, newest first.
    pub async fn list(
        &self,
        filter: &RestaurantFilter,
        page: Pagination,
    ) -> Result<Paginated<Restaurant>, DbError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {COLUMNS}, COUNT(*) OVER() AS total
            FROM restaurants r
            WHERE ($1::text IS NULL OR r.name ILIKE $1 OR r.branch_name ILIKE $1)
              AND ($2::bigint IS NULL OR EXISTS (
                    SELECT 1 FROM restaurant_tags rt
                    WHERE rt.restaurant_id = r.id AND rt.tag_id = $2))
            ORDER BY r.id DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(search_pattern(filter.q.as_deref()))
        .bind(filter.tag_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        page_from_rows(rows, page)
    }

    /// Update form fields and replace tag links. Rating fields are untouched.
    pub async fn update(&self, id: i64, draft: &RestaurantDraft) -> Result<Restaurant, DbError> {
        let mut tx = self.pool.begin().await?;

        let restaurant: Restaurant = sqlx::query_as(&format!(
            r#"
            UPDATE restaurants
            SET name = $2, branch_name = $3, description = $4, address = $5, feature = $6,
                is_closed = $7, latitude = $8, longitude = $9, phone = $10,
                start_time = $11, end_time = $12, last_order_time = $13,
                category_id = $14, region_id = $15
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.branch_name)
        .bind(&draft.description)
        .bind(&draft.address)
        .bind(&draft.feature)
        .bind(draft.is_closed)
        .bind(draft.latitude)
        .bind(draft.longitude)
        .bind(&draft.phone)
        .bind(draft.start_time)
        .bind(draft.end_time)
        .bind(draft.last_order_time)
        .bind(draft.category_id)
        .bind(draft.region_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("restaurant", id))?;

        replace_tags(&mut tx, id, &draft.tag_ids).await?;

        tx.commit().await?;
        Ok(restaurant)
    }

    /// Overwrite the externally maintained rating aggregate.
    pub async fn set_rating(&self, id: i64, rating: RatingDraft) -> Result<Restaurant, DbError> {
        sqlx::query_as(&format!(
            "UPDATE restaurants SET rating = $2, rating_count = $3 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(rating.rating)
        .bind(rating.rating_count)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("restaurant", id))
    }

    /// Delete a restaurant with its images, menus and reviews (cascade).
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("restaurant", id));
        }
        tracing::debug!(id, "Restaurant deleted");
        Ok(())
    }
}

/// Lock a restaurant row for the rest of the transaction.
///
/// Writers of per-restaurant invariants take this lock first so they
/// serialize against each other.
pub(crate) async fn lock(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<(), DbError> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM restaurants WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .map(|_| ())
        .ok_or_else(|| DbError::not_found("restaurant", id))
}

async fn replace_tags(
    tx: &mut Transaction<'_, Postgres>,
    restaurant_id: i64,
    tag_ids: &[i64],
) -> Result<(), DbError> {
    sqlx::query("DELETE FROM restaurant_tags WHERE restaurant_id = $1")
        .bind(restaurant_id)
        .execute(&mut **tx)
        .await?;

    if tag_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO restaurant_tags (restaurant_id, tag_id)
        SELECT $1, tag_id FROM UNNEST($2::bigint[]) AS tag_id
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(restaurant_id)
    .bind(tag_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_with_branch() {
        assert_eq!(display_name("을지면옥", Some("본점")), "을지면옥본점");
        assert_eq!(display_name("을지면옥", None), "을지면옥");
        assert_eq!(display_name("을지면옥", Some("")), "을지면옥");
    }
}
