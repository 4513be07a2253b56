//! Region endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use super::{pagination, search, ChangeResponse};
use crate::admin::REGION;
use crate::db::repos::{Region, RegionFilter, RegionRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidPath, ValidQuery};
use crate::http::server::AppState;
use crate::models::{Paginated, RegionForm};

#[derive(Debug, Default, Deserialize)]
pub struct RegionQuery {
    pub q: Option<String>,
    pub province: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

async fn list_regions(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<RegionQuery>,
) -> Result<Json<Paginated<Region>>, ApiError> {
    let filter = RegionFilter {
        q: search(&REGION, query.q.as_deref()).map(str::to_owned),
        province: query.province,
    };
    let page = pagination(query.page, query.per_page);
    let result = RegionRepo::new(&state.pool).list(&filter, page).await?;
    Ok(Json(result))
}

async fn create_region(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<RegionForm>,
) -> Result<(StatusCode, Json<Region>), ApiError> {
    let draft = form.validate()?;
    let region = RegionRepo::new(&state.pool).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(region)))
}

async fn get_region(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<ChangeResponse<Region>>, ApiError> {
    let region = RegionRepo::new(&state.pool).get(id).await?;
    let display = region.display_name();
    Ok(Json(ChangeResponse::new(&REGION, id, region, display)))
}

async fn update_region(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
    JsonBody(form): JsonBody<RegionForm>,
) -> Result<Json<Region>, ApiError> {
    let draft = form.validate()?;
    let region = RegionRepo::new(&state.pool).update(id, &draft).await?;
    Ok(Json(region))
}

async fn delete_region(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<StatusCode, ApiError> {
    RegionRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Region routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/regions", get(list_regions).post(create_region))
        .route(
            "/admin/regions/{id}",
            get(get_region).put(update_region).delete(delete_region),
        )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::send;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn region_requires_every_part() {
        let (status, body) = send(
            "POST",
            "/admin/regions",
            Some(r#"{"province": "서울특별시", "district": "종로구"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "neighborhood cannot be empty");
    }
}
