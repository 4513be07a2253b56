//! Region repository
//!
//! (province, district, neighborhood) is unique; a duplicate insert
//! surfaces as `DbError::Conflict`.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::{page_from_rows, search_pattern, DbError};
use crate::models::{Paginated, Pagination, RegionDraft};

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Region {
    pub id: i64,
    pub province: String,
    pub district: String,
    pub neighborhood: String,
}

impl Region {
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.province, self.district, self.neighborhood)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegionFilter {
    pub q: Option<String>,
    pub province: Option<String>,
}

pub struct RegionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RegionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, draft: &RegionDraft) -> Result<Region, DbError> {
        let region = sqlx::query_as(
            r#"
            INSERT INTO regions (province, district, neighborhood)
            VALUES ($1, $2, $3)
            RETURNING id, province, district, neighborhood
            "#,
        )
        .bind(&draft.province)
        .bind(&draft.district)
        .bind(&draft.neighborhood)
        .fetch_one(self.pool)
        .await?;

        Ok(region)
    }

    pub async fn get(&self, id: i64) -> Result<Region, DbError> {
        sqlx::query_as("SELECT id, province, district, neighborhood FROM regions WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("region", id))
    }

    /// List regions ordered by location; `q` searches all three parts.
    pub async fn list(
        &self,
        filter: &RegionFilter,
        page: Pagination,
    ) -> Result<Paginated<Region>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, province, district, neighborhood, COUNT(*) OVER() AS total
            FROM regions
            WHERE ($1::text IS NULL
                   OR province ILIKE $1 OR district ILIKE $1 OR neighborhood ILIKE $1)
              AND ($2::text IS NULL OR province = $2)
            ORDER BY province, district, neighborhood
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search_pattern(filter.q.as_deref()))
        .bind(filter.province.as_deref())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        page_from_rows(rows, page)
    }

    pub async fn update(&self, id: i64, draft: &RegionDraft) -> Result<Region, DbError> {
        sqlx::query_as(
            r#"
            UPDATE regions
            SET province = $2, district = $3, neighborhood = $4
            WHERE id = $1
            RETURNING id, province, district, neighborhood
            "#,
        )
        .bind(id)
        .bind(&draft.province)
        .bind(&draft.district)
        .bind(&draft.neighborhood)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("region", id))
    }

    /// Delete a region. Restaurants in it keep existing with no region.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM regions WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("region", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_parts() {
        let region = Region {
            id: 1,
            province: "서울특별시".into(),
            district: "종로구".into(),
            neighborhood: "체부동".into(),
        };
        assert_eq!(region.display_name(), "서울특별시 종로구 체부동");
    }
}
