//! Article repository
//!
//! Besides CRUD, supports the admin list filters (flags, search on title,
//! year/month drill-down on created_at) and the bulk publish action.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::{page_from_rows, search_pattern, DbError};
use crate::models::{ArticleDraft, Paginated, Pagination};

/// Article record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub preview_image: Option<String>,
    pub content: String,
    pub show_at_index: bool,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Article {
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.id, self.title)
    }
}

/// List filters for the article changelist
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub q: Option<String>,
    pub show_at_index: Option<bool>,
    pub is_published: Option<bool>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

const COLUMNS: &str =
    "id, title, preview_image, content, show_at_index, is_published, created_at, modified_at";

/// Article repository
pub struct ArticleRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArticleRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, draft: &ArticleDraft) -> Result<Article, DbError> {
        let article: Article = sqlx::query_as(&format!(
            r#"
            INSERT INTO articles (title, preview_image, content, show_at_index, is_published)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.preview_image)
        .bind(&draft.content)
        .bind(draft.show_at_index)
        .bind(draft.is_published)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(id = article.id, "Article created");
        Ok(article)
    }

    pub async fn get(&self, id: i64) -> Result<Article, DbError> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM articles WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("article", id))
    }

    /// List articles, newest first.
    pub async fn list(
        &self,
        filter: &ArticleFilter,
        page: Pagination,
    ) -> Result<Paginated<Article>, DbError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {COLUMNS}, COUNT(*) OVER() AS total
            FROM articles
            WHERE ($1::text IS NULL OR title ILIKE $1)
              AND ($2::bool IS NULL OR show_at_index = $2)
              AND ($3::bool IS NULL OR is_published = $3)
              AND ($4::int IS NULL OR EXTRACT(YEAR FROM created_at)::int = $4)
              AND ($5::int IS NULL OR EXTRACT(MONTH FROM created_at)::int = $5)
            ORDER BY created_at DESC, id DESC
            LIMIT $6 OFFSET $7
            "#
        ))
        .bind(search_pattern(filter.q.as_deref()))
        .bind(filter.show_at_index)
        .bind(filter.is_published)
        .bind(filter.year)
        .bind(filter.month.map(|m| m as i32))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        page_from_rows(rows, page)
    }

    /// Update an article; refreshes `modified_at`.
    pub async fn update(&self, id: i64, draft: &ArticleDraft) -> Result<Article, DbError> {
        sqlx::query_as(&format!(
            r#"
            UPDATE articles
            SET title = $2, preview_image = $3, content = $4,
                show_at_index = $5, is_published = $6, modified_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.preview_image)
        .bind(&draft.content)
        .bind(draft.show_at_index)
        .bind(draft.is_published)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("article", id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("article", id));
        }
        Ok(())
    }

    /// Bulk action: mark the given articles as published.
    ///
    /// Unknown ids are ignored; returns the number of rows updated.
    pub async fn publish(&self, ids: &[i64]) -> Result<u64, DbError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            UPDATE articles
            SET is_published = TRUE, modified_at = NOW()
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .execute(self.pool)
        .await?;

        tracing::info!(requested = ids.len(), updated = result.rows_affected(), "Articles published");
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_name_includes_id() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let article = Article {
            id: 12,
            title: "Summer noodles".into(),
            preview_image: None,
            content: String::new(),
            show_at_index: false,
            is_published: true,
            created_at: at,
            modified_at: at,
        };
        assert_eq!(article.display_name(), "12 - Summer noodles");
    }
}
