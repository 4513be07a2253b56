//! Name-only lookup tables: tags, cuisine types, social channels
//!
//! The three tables share one shape (`id`, `name`), so a single repository
//! serves them, parameterized by [`NamedTable`].

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::{page_from_rows, search_pattern, DbError};
use crate::models::{Paginated, Pagination};

/// Maximum rows returned by [`NamedRepo::autocomplete`]
const AUTOCOMPLETE_LIMIT: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedTable {
    Tag,
    CuisineType,
    SocialChannel,
}

impl NamedTable {
    fn table(&self) -> &'static str {
        match self {
            Self::Tag => "tags",
            Self::CuisineType => "cuisine_types",
            Self::SocialChannel => "social_channels",
        }
    }

    /// Resource name used in errors
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::CuisineType => "cuisine type",
            Self::SocialChannel => "social channel",
        }
    }
}

/// `id` + `name` record
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Named {
    pub id: i64,
    pub name: String,
}

pub struct NamedRepo<'a> {
    pool: &'a PgPool,
    table: NamedTable,
}

impl<'a> NamedRepo<'a> {
    pub fn new(pool: &'a PgPool, table: NamedTable) -> Self {
        Self { pool, table }
    }

    pub fn tags(pool: &'a PgPool) -> Self {
        Self::new(pool, NamedTable::Tag)
    }

    pub fn cuisine_types(pool: &'a PgPool) -> Self {
        Self::new(pool, NamedTable::CuisineType)
    }

    pub async fn create(&self, name: &str) -> Result<Named, DbError> {
        let table = self.table.table();
        let row: Named = sqlx::query_as(&format!(
            "INSERT INTO {table} (name) VALUES ($1) RETURNING id, name"
        ))
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(table, id = row.id, "Row created");
        Ok(row)
    }

    pub async fn get(&self, id: i64) -> Result<Named, DbError> {
        let table = self.table.table();
        sqlx::query_as(&format!("SELECT id, name FROM {table} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(self.table.resource(), id))
    }

    /// List rows, newest first, optionally searching by name.
    pub async fn list(&self, q: Option<&str>, page: Pagination) -> Result<Paginated<Named>, DbError> {
        let table = self.table.table();
        let rows = sqlx::query(&format!(
            r#"
            SELECT id, name, COUNT(*) OVER() AS total
            FROM {table}
            WHERE ($1::text IS NULL OR name ILIKE $1)
            ORDER BY id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(search_pattern(q))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        page_from_rows(rows, page)
    }

    /// Matches for autocomplete widgets, alphabetical.
    pub async fn autocomplete(&self, term: Option<&str>) -> Result<Vec<Named>, DbError> {
        let table = self.table.table();
        let rows = sqlx::query_as(&format!(
            r#"
            SELECT id, name
            FROM {table}
            WHERE ($1::text IS NULL OR name ILIKE $1)
            ORDER BY name
            LIMIT $2
            "#
        ))
        .bind(search_pattern(term))
        .bind(AUTOCOMPLETE_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update(&self, id: i64, name: &str) -> Result<Named, DbError> {
        let table = self.table.table();
        sqlx::query_as(&format!(
            "UPDATE {table} SET name = $2 WHERE id = $1 RETURNING id, name"
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(self.table.resource(), id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let table = self.table.table();
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(self.table.resource(), id));
        }
        Ok(())
    }
}
