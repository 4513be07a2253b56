//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool; one repository value per request
//! - Optional filters are bound as nullable parameters, not spliced into SQL
//! - List queries return the total with `COUNT(*) OVER()` (single query)
//! - Multi-step writes run in one transaction

pub mod articles;
pub mod categories;
pub mod named;
pub mod regions;
pub mod restaurant_images;
pub mod restaurant_menus;
pub mod restaurants;
pub mod review_images;
pub mod reviews;

pub use articles::{Article, ArticleFilter, ArticleRepo};
pub use categories::{Category, CategoryRepo};
pub use named::{Named, NamedRepo, NamedTable};
pub use regions::{Region, RegionFilter, RegionRepo};
pub use restaurant_images::{RestaurantImage, RestaurantImageRepo};
pub use restaurant_menus::{RestaurantMenu, RestaurantMenuRepo};
pub use restaurants::{Restaurant, RestaurantFilter, RestaurantRepo};
pub use review_images::{ReviewImage, ReviewImageRepo};
pub use reviews::{Review, ReviewFilter, ReviewListRow, ReviewRepo};

use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use super::DbError;
use crate::models::{Paginated, Pagination};

/// Build a case-insensitive substring pattern for `ILIKE`.
///
/// Blank input means "no search"; `%`, `_` and `\` in the input match
/// literally.
pub fn search_pattern(q: Option<&str>) -> Option<String> {
    let q = q.map(str::trim).filter(|q| !q.is_empty())?;

    let mut pattern = String::with_capacity(q.len() + 2);
    pattern.push('%');
    for c in q.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// Decode a page of rows that carry a `total` window column.
pub(crate) fn page_from_rows<T>(rows: Vec<PgRow>, page: Pagination) -> Result<Paginated<T>, DbError>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    let total = match rows.first() {
        Some(row) => row.try_get::<i64, _>("total")?,
        None => 0,
    };

    let items = rows
        .iter()
        .map(T::from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(page.wrap(items, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_none() {
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some("   ")), None);
    }

    #[test]
    fn search_wraps_and_trims() {
        assert_eq!(search_pattern(Some(" 냉면 ")).as_deref(), Some("%냉면%"));
    }

    #[test]
    fn search_escapes_wildcards() {
        assert_eq!(search_pattern(Some("100%_\\")).as_deref(), Some("%100\\%\\_\\\\%"));
    }
}
