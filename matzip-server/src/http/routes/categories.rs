//! Restaurant category endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use super::{pagination, ChangeResponse};
use crate::admin::RESTAURANT_CATEGORY;
use crate::db::repos::{Category, CategoryRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidPath, ValidQuery};
use crate::http::server::AppState;
use crate::models::{CategoryForm, Paginated};

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub cuisine_type_id: Option<i64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /admin/restaurant-categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<CategoryQuery>,
) -> Result<Json<Paginated<Category>>, ApiError> {
    let page = pagination(query.page, query.per_page);
    let result = CategoryRepo::new(&state.pool)
        .list(query.cuisine_type_id, page)
        .await?;
    Ok(Json(result))
}

/// POST /admin/restaurant-categories
async fn create_category(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<CategoryForm>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let draft = form.validate()?;
    let category = CategoryRepo::new(&state.pool).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /admin/restaurant-categories/{id}
async fn get_category(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<ChangeResponse<Category>>, ApiError> {
    let category = CategoryRepo::new(&state.pool).get(id).await?;
    let display = category.name.clone();
    Ok(Json(ChangeResponse::new(&RESTAURANT_CATEGORY, id, category, display)))
}

/// PUT /admin/restaurant-categories/{id}
async fn update_category(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
    JsonBody(form): JsonBody<CategoryForm>,
) -> Result<Json<Category>, ApiError> {
    let draft = form.validate()?;
    let category = CategoryRepo::new(&state.pool).update(id, &draft).await?;
    Ok(Json(category))
}

/// DELETE /admin/restaurant-categories/{id}
async fn delete_category(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<StatusCode, ApiError> {
    CategoryRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/admin/restaurant-categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/admin/restaurant-categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::send;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn category_name_limited_to_twenty_chars() {
        let body = format!(r#"{{"name": "{}", "cuisine_type_id": 1}}"#, "면".repeat(21));
        let (status, body) = send("POST", "/admin/restaurant-categories", Some(&body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "name exceeds maximum length of 20 characters");
    }

    #[tokio::test]
    async fn invalid_filter_is_400() {
        let (status, _) = send("GET", "/admin/restaurant-categories?cuisine_type_id=x", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
