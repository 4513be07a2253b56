//! Restaurant endpoints
//!
//! Restaurant CRUD, the rating maintenance operation, and the inline
//! menu and image editors of the change view.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{pagination, search, ChangeResponse};
use crate::admin::RESTAURANT;
use crate::db::repos::{
    Named, Restaurant, RestaurantFilter, RestaurantImage, RestaurantImageRepo, RestaurantMenu,
    RestaurantMenuRepo, RestaurantRepo,
};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidPath, ValidQuery};
use crate::http::server::AppState;
use crate::models::{
    Paginated, RatingForm, RestaurantForm, RestaurantImageForm, RestaurantMenuForm,
};

#[derive(Debug, Default, Deserialize)]
pub struct RestaurantQuery {
    pub q: Option<String>,
    /// `tags` list filter
    pub tag_id: Option<i64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Restaurant with its tags
#[derive(Debug, Serialize)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub tags: Vec<Named>,
}

/// GET /admin/restaurants
async fn list_restaurants(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<RestaurantQuery>,
) -> Result<Json<Paginated<Restaurant>>, ApiError> {
    let filter = RestaurantFilter {
        q: search(&RESTAURANT, query.q.as_deref()).map(str::to_owned),
        tag_id: query.tag_id,
    };
    let page = pagination(query.page, query.per_page);
    let result = RestaurantRepo::new(&state.pool).list(&filter, page).await?;
    Ok(Json(result))
}

/// POST /admin/restaurants
async fn create_restaurant(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<RestaurantForm>,
) -> Result<(StatusCode, Json<RestaurantDetail>), ApiError> {
    let draft = form.validate()?;
    let repo = RestaurantRepo::new(&state.pool);
    let restaurant = repo.create(&draft).await?;
    let tags = repo.tags(restaurant.id).await?;
    Ok((StatusCode::CREATED, Json(RestaurantDetail { restaurant, tags })))
}

/// GET /admin/restaurants/{id} - change view with menu and image inlines
async fn get_restaurant(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<ChangeResponse<RestaurantDetail>>, ApiError> {
    let repo = RestaurantRepo::new(&state.pool);
    let restaurant = repo.get(id).await?;
    let tags = repo.tags(id).await?;
    let menus = RestaurantMenuRepo::new(&state.pool).list_for(id).await?;
    let images = RestaurantImageRepo::new(&state.pool).list_for(id).await?;

    let display = restaurant.display_name();
    let response = ChangeResponse::new(&RESTAURANT, id, RestaurantDetail { restaurant, tags }, display)
        .with_inline("menus", menus)?
        .with_inline("images", images)?;
    Ok(Json(response))
}

/// PUT /admin/restaurants/{id} - rating fields in the body are ignored
async fn update_restaurant(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
    JsonBody(form): JsonBody<RestaurantForm>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let draft = form.validate()?;
    let repo = RestaurantRepo::new(&state.pool);
    let restaurant = repo.update(id, &draft).await?;
    let tags = repo.tags(id).await?;
    Ok(Json(RestaurantDetail { restaurant, tags }))
}

/// DELETE /admin/restaurants/{id}
async fn delete_restaurant(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<StatusCode, ApiError> {
    RestaurantRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /admin/restaurants/{id}/rating
async fn set_rating(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
    JsonBody(form): JsonBody<RatingForm>,
) -> Result<Json<Restaurant>, ApiError> {
    let rating = form.validate()?;
    let restaurant = RestaurantRepo::new(&state.pool).set_rating(id, rating).await?;
    tracing::info!(id, rating = %restaurant.rating, count = restaurant.rating_count, "Rating updated");
    Ok(Json(restaurant))
}

/// GET /admin/restaurants/{id}/images
async fn list_images(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<Vec<RestaurantImage>>, ApiError> {
    RestaurantRepo::new(&state.pool).ensure_exists(id).await?;
    let images = RestaurantImageRepo::new(&state.pool).list_for(id).await?;
    Ok(Json(images))
}

/// POST /admin/restaurants/{id}/images
async fn create_image(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
    JsonBody(form): JsonBody<RestaurantImageForm>,
) -> Result<(StatusCode, Json<RestaurantImage>), ApiError> {
    let draft = form.validate()?;
    let image = RestaurantImageRepo::new(&state.pool).create(id, &draft).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// PUT /admin/restaurants/{id}/images/{image_id}
async fn update_image(
    State(state): State<Arc<AppState>>,
    ValidPath((id, image_id)): ValidPath<(i64, i64)>,
    JsonBody(form): JsonBody<RestaurantImageForm>,
) -> Result<Json<RestaurantImage>, ApiError> {
    let draft = form.validate()?;
    let image = RestaurantImageRepo::new(&state.pool)
        .update(id, image_id, &draft)
        .await?;
    Ok(Json(image))
}

/// DELETE /admin/restaurants/{id}/images/{image_id}
async fn delete_image(
    State(state): State<Arc<AppState>>,
    ValidPath((id, image_id)): ValidPath<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    RestaurantImageRepo::new(&state.pool).delete(id, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /admin/restaurants/{id}/menus
async fn list_menus(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<Vec<RestaurantMenu>>, ApiError> {
    RestaurantRepo::new(&state.pool).ensure_exists(id).await?;
    let menus = RestaurantMenuRepo::new(&state.pool).list_for(id).await?;
    Ok(Json(menus))
}

/// POST /admin/restaurants/{id}/menus
async fn create_menu(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
    JsonBody(form): JsonBody<RestaurantMenuForm>,
) -> Result<(StatusCode, Json<RestaurantMenu>), ApiError> {
    let draft = form.validate()?;
    let menu = RestaurantMenuRepo::new(&state.pool).create(id, &draft).await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

/// PUT /admin/restaurants/{id}/menus/{menu_id}
async fn update_menu(
    State(state): State<Arc<AppState>>,
    ValidPath((id, menu_id)): ValidPath<(i64, i64)>,
    JsonBody(form): JsonBody<RestaurantMenuForm>,
) -> Result<Json<RestaurantMenu>, ApiError> {
    let draft = form.validate()?;
    let menu = RestaurantMenuRepo::new(&state.pool)
        .update(id, menu_id, &draft)
        .await?;
    Ok(Json(menu))
}

/// DELETE /admin/restaurants/{id}/menus/{menu_id}
async fn delete_menu(
    State(state): State<Arc<AppState>>,
    ValidPath((id, menu_id)): ValidPath<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    RestaurantMenuRepo::new(&state.pool).delete(id, menu_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Restaurant routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/restaurants", get(list_restaurants).post(create_restaurant))
        .route(
            "/admin/restaurants/{id}",
            get(get_restaurant)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
        .route("/admin/restaurants/{id}/rating", put(set_rating))
        .route(
            "/admin/restaurants/{id}/images",
            get(list_images).post(create_image),
        )
        .route(
            "/admin/restaurants/{id}/images/{image_id}",
            put(update_image).delete(delete_image),
        )
        .route(
            "/admin/restaurants/{id}/menus",
            get(list_menus).post(create_menu),
        )
        .route(
            "/admin/restaurants/{id}/menus/{menu_id}",
            put(update_menu).delete(delete_menu),
        )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::send;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn out_of_range_latitude_rejected() {
        let (status, body) = send(
            "POST",
            "/admin/restaurants",
            Some(r#"{"name": "우래옥", "address": "서울 중구 창경궁로 62-29", "phone": "+8222658318", "latitude": "91.5"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn rating_needs_two_decimal_places_at_most() {
        let (status, _) = send(
            "PUT",
            "/admin/restaurants/1/rating",
            Some(r#"{"rating": "4.125", "rating_count": 3}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn image_outside_its_directory_rejected() {
        let (status, body) = send(
            "POST",
            "/admin/restaurants/1/images",
            Some(r#"{"is_representative": true, "image": "review/front.jpg"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn negative_menu_price_rejected() {
        let (status, _) = send(
            "PUT",
            "/admin/restaurants/1/menus/2",
            Some(r#"{"name": "물냉면", "price": -1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn nested_ids_must_be_numeric() {
        let (status, body) = send("DELETE", "/admin/restaurants/1/images/front", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }
}
