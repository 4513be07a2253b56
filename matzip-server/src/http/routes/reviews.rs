//! Review endpoints with the inline review-image editor

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{pagination, ChangeResponse};
use crate::admin::{content_partial, REVIEW};
use crate::db::repos::{Review, ReviewFilter, ReviewImage, ReviewImageRepo, ReviewListRow, ReviewRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidPath, ValidQuery};
use crate::http::server::AppState;
use crate::models::{Paginated, ReviewForm, ReviewImageForm};

#[derive(Debug, Default, Deserialize)]
pub struct ReviewQuery {
    pub restaurant_id: Option<i64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Changelist row: the review's list columns
#[derive(Debug, Serialize)]
pub struct ReviewListItem {
    pub id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub author: String,
    pub rating: i16,
    pub content_partial: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewListRow> for ReviewListItem {
    fn from(row: ReviewListRow) -> Self {
        let restaurant_name = row.restaurant_display();
        let review = row.review;
        Self {
            id: review.id,
            restaurant_id: review.restaurant_id,
            restaurant_name,
            author: review.author,
            rating: review.rating,
            content_partial: content_partial(&review.content),
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewDetail {
    #[serde(flatten)]
    pub review: Review,
    pub restaurant_name: String,
}

/// GET /admin/reviews
async fn list_reviews(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<ReviewQuery>,
) -> Result<Json<Paginated<ReviewListItem>>, ApiError> {
    let filter = ReviewFilter {
        restaurant_id: query.restaurant_id,
    };
    let page = pagination(query.page, query.per_page);
    let result = ReviewRepo::new(&state.pool).list(&filter, page).await?;
    Ok(Json(result.map(ReviewListItem::from)))
}

/// POST /admin/reviews
async fn create_review(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<ReviewForm>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let draft = form.validate()?;
    let review = ReviewRepo::new(&state.pool).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /admin/reviews/{id} - change view with the image inline
async fn get_review(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<ChangeResponse<ReviewDetail>>, ApiError> {
    let repo = ReviewRepo::new(&state.pool);
    let review = repo.get(id).await?;
    let restaurant_name = repo.restaurant_display(&review).await?;
    let images = ReviewImageRepo::new(&state.pool).list_for(id).await?;

    let display = review.display_name();
    let detail = ReviewDetail {
        review,
        restaurant_name,
    };
    let response = ChangeResponse::new(&REVIEW, id, detail, display).with_inline("images", images)?;
    Ok(Json(response))
}

/// PUT /admin/reviews/{id}
async fn update_review(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
    JsonBody(form): JsonBody<ReviewForm>,
) -> Result<Json<Review>, ApiError> {
    let draft = form.validate()?;
    let review = ReviewRepo::new(&state.pool).update(id, &draft).await?;
    Ok(Json(review))
}

/// DELETE /admin/reviews/{id}
async fn delete_review(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<StatusCode, ApiError> {
    ReviewRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /admin/reviews/{id}/images
async fn list_images(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<Vec<ReviewImage>>, ApiError> {
    ReviewRepo::new(&state.pool).ensure_exists(id).await?;
    let images = ReviewImageRepo::new(&state.pool).list_for(id).await?;
    Ok(Json(images))
}

/// POST /admin/reviews/{id}/images
async fn create_image(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
    JsonBody(form): JsonBody<ReviewImageForm>,
) -> Result<(StatusCode, Json<ReviewImage>), ApiError> {
    let draft = form.validate()?;
    let image = ReviewImageRepo::new(&state.pool).create(id, &draft).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// PUT /admin/reviews/{id}/images/{image_id}
async fn update_image(
    State(state): State<Arc<AppState>>,
    ValidPath((id, image_id)): ValidPath<(i64, i64)>,
    JsonBody(form): JsonBody<ReviewImageForm>,
) -> Result<Json<ReviewImage>, ApiError> {
    let draft = form.validate()?;
    let image = ReviewImageRepo::new(&state.pool)
        .update(id, image_id, &draft)
        .await?;
    Ok(Json(image))
}

/// DELETE /admin/reviews/{id}/images/{image_id}
async fn delete_image(
    State(state): State<Arc<AppState>>,
    ValidPath((id, image_id)): ValidPath<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    ReviewImageRepo::new(&state.pool).delete(id, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Review routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/reviews", get(list_reviews).post(create_review))
        .route(
            "/admin/reviews/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        .route("/admin/reviews/{id}/images", get(list_images).post(create_image))
        .route(
            "/admin/reviews/{id}/images/{image_id}",
            put(update_image).delete(delete_image),
        )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::send;
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn list_item_truncates_content() {
        let at = Utc::now();
        let row = ReviewListRow {
            review: Review {
                id: 4,
                restaurant_id: 9,
                title: "Clear broth".into(),
                author: "minji".into(),
                profile_image: None,
                content: "The broth is clear, cold and a little sweet.".into(),
                rating: 5,
                social_channel_id: None,
                created_at: at,
                updated_at: at,
            },
            restaurant_name: "을지면옥".into(),
            restaurant_branch_name: None,
        };

        let item = ReviewListItem::from(row);
        assert_eq!(item.restaurant_name, "을지면옥");
        assert_eq!(item.content_partial, "The broth is clear, ...");
    }

    #[tokio::test]
    async fn rating_outside_one_to_five_rejected() {
        for rating in [0, 6] {
            let body = format!(
                r#"{{"restaurant_id": 1, "title": "t", "author": "a", "content": "c", "rating": {}}}"#,
                rating
            );
            let (status, body) = send("POST", "/admin/reviews", Some(&body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "rating: must be between 1 and 5");
        }
    }

    #[tokio::test]
    async fn review_image_requires_name() {
        let (status, body) = send(
            "POST",
            "/admin/reviews/1/images",
            Some(r#"{"image": "table.jpg"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "name cannot be empty");
    }
}
