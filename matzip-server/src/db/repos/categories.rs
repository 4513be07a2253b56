//! Restaurant category repository
//!
//! Categories optionally belong to a cuisine type; deleting the cuisine
//! type deletes its categories (ON DELETE CASCADE).

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::{page_from_rows, DbError};
use crate::models::{CategoryDraft, Paginated, Pagination};

/// Category with its cuisine type name joined in
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub cuisine_type_id: Option<i64>,
    pub cuisine_type_name: Option<String>,
}

const SELECT: &str = r#"
    SELECT c.id, c.name, c.cuisine_type_id, ct.name AS cuisine_type_name
    FROM restaurant_categories c
    LEFT JOIN cuisine_types ct ON ct.id = c.cuisine_type_id
"#;

pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, draft: &CategoryDraft) -> Result<Category, DbError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO restaurant_categories (name, cuisine_type_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&draft.name)
        .bind(draft.cuisine_type_id)
        .fetch_one(self.pool)
        .await?;

        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> Result<Category, DbError> {
        sqlx::query_as(&format!("{SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("restaurant category", id))
    }

    /// List categories, optionally only those of one cuisine type.
    pub async fn list(
        &self,
        cuisine_type_id: Option<i64>,
        page: Pagination,
    ) -> Result<Paginated<Category>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.name, c.cuisine_type_id, ct.name AS cuisine_type_name,
                   COUNT(*) OVER() AS total
            FROM restaurant_categories c
            LEFT JOIN cuisine_types ct ON ct.id = c.cuisine_type_id
            WHERE ($1::bigint IS NULL OR c.cuisine_type_id = $1)
            ORDER BY c.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(cuisine_type_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        page_from_rows(rows, page)
    }

    pub async fn update(&self, id: i64, draft: &CategoryDraft) -> Result<Category, DbError> {
        let result = sqlx::query(
            "UPDATE restaurant_categories SET name = $2, cuisine_type_id = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(&draft.name)
        .bind(draft.cuisine_type_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("restaurant category", id));
        }
        self.get(id).await
    }

    /// Delete a category. Restaurants in it keep existing with no category.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM restaurant_categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("restaurant category", id));
        }
        Ok(())
    }
}
