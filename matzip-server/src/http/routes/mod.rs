//! Route handlers organized by resource

pub mod admin;
pub mod articles;
pub mod categories;
pub mod health;
pub mod named;
pub mod regions;
pub mod restaurants;
pub mod reviews;

use std::sync::Arc;

use axum::Router;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::admin::{FormView, ModelAdmin};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{Pagination, PaginationParams};

/// All routes, unlayered
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(admin::router())
        .merge(articles::router())
        .merge(named::router())
        .merge(categories::router())
        .merge(regions::router())
        .merge(restaurants::router())
        .merge(reviews::router())
}

/// Change view payload: the object, its form descriptor and inline rows
#[derive(Debug, Serialize)]
pub struct ChangeResponse<T> {
    pub object: T,
    pub display: String,
    pub form: FormView,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub inlines: Map<String, Value>,
}

impl<T> ChangeResponse<T> {
    pub fn new(admin: &ModelAdmin, id: i64, object: T, display: String) -> Self {
        Self {
            object,
            display,
            form: admin.change_view(id),
            inlines: Map::new(),
        }
    }

    /// Attach the rows of one inline editor, keyed by its path.
    pub fn with_inline(mut self, path: &str, rows: impl Serialize) -> Result<Self, ApiError> {
        self.inlines.insert(path.to_owned(), serde_json::to_value(rows)?);
        Ok(self)
    }
}

/// Pagination from optional `page`/`per_page` query values.
pub(crate) fn pagination(page: Option<u32>, per_page: Option<u32>) -> Pagination {
    Pagination::from(PaginationParams { page, per_page })
}

/// Drop the search term for models without search fields.
pub(crate) fn search<'q>(admin: &ModelAdmin, q: Option<&'q str>) -> Option<&'q str> {
    if admin.search_fields.is_empty() {
        None
    } else {
        q
    }
}
