//! Tag, cuisine type and social channel endpoints
//!
//! The three tables share one set of handlers, parameterized by table.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::{pagination, search, ChangeResponse};
use crate::admin::{ModelAdmin, CUISINE_TYPE, SOCIAL_CHANNEL, TAG};
use crate::db::repos::{Named, NamedRepo, NamedTable};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidPath, ValidQuery};
use crate::http::server::AppState;
use crate::models::{NameForm, Paginated, ValidationError};

#[derive(Debug, Default, Deserialize)]
pub struct NamedQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AutocompleteQuery {
    pub term: Option<String>,
}

/// One autocomplete choice
#[derive(Debug, Serialize)]
pub struct Choice {
    pub id: i64,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub results: Vec<Choice>,
}

fn validate(table: NamedTable, form: &NameForm) -> Result<String, ValidationError> {
    match table {
        NamedTable::Tag => form.tag(),
        NamedTable::CuisineType => form.cuisine_type(),
        NamedTable::SocialChannel => form.social_channel(),
    }
}

async fn list(
    table: NamedTable,
    admin: &'static ModelAdmin,
    state: Arc<AppState>,
    query: NamedQuery,
) -> Result<Json<Paginated<Named>>, ApiError> {
    let page = pagination(query.page, query.per_page);
    let q = search(admin, query.q.as_deref());
    let result = NamedRepo::new(&state.pool, table).list(q, page).await?;
    Ok(Json(result))
}

async fn create(
    table: NamedTable,
    state: Arc<AppState>,
    form: NameForm,
) -> Result<(StatusCode, Json<Named>), ApiError> {
    let name = validate(table, &form)?;
    let row = NamedRepo::new(&state.pool, table).create(&name).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_one(
    table: NamedTable,
    admin: &'static ModelAdmin,
    state: Arc<AppState>,
    id: i64,
) -> Result<Json<ChangeResponse<Named>>, ApiError> {
    let row = NamedRepo::new(&state.pool, table).get(id).await?;
    let display = row.name.clone();
    Ok(Json(ChangeResponse::new(admin, id, row, display)))
}

async fn update(
    table: NamedTable,
    state: Arc<AppState>,
    id: i64,
    form: NameForm,
) -> Result<Json<Named>, ApiError> {
    let name = validate(table, &form)?;
    let row = NamedRepo::new(&state.pool, table).update(id, &name).await?;
    Ok(Json(row))
}

async fn delete(table: NamedTable, state: Arc<AppState>, id: i64) -> Result<StatusCode, ApiError> {
    NamedRepo::new(&state.pool, table).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /admin/tags/autocomplete?term= - choices for the restaurant tag widget
async fn autocomplete_tags(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<AutocompleteQuery>,
) -> Result<Json<AutocompleteResponse>, ApiError> {
    let rows = NamedRepo::tags(&state.pool)
        .autocomplete(query.term.as_deref())
        .await?;

    Ok(Json(AutocompleteResponse {
        results: rows
            .into_iter()
            .map(|row| Choice {
                id: row.id,
                text: row.name,
            })
            .collect(),
    }))
}

fn table_router(table: NamedTable, admin: &'static ModelAdmin) -> Router<Arc<AppState>> {
    let collection = format!("/admin/{}", admin.path);
    let member = format!("/admin/{}/{{id}}", admin.path);

    Router::new()
        .route(
            &collection,
            get(
                move |State(state): State<Arc<AppState>>,
                      ValidQuery(query): ValidQuery<NamedQuery>| {
                    list(table, admin, state, query)
                },
            )
            .post(
                move |State(state): State<Arc<AppState>>, JsonBody(form): JsonBody<NameForm>| {
                    create(table, state, form)
                },
            ),
        )
        .route(
            &member,
            get(
                move |State(state): State<Arc<AppState>>, ValidPath(id): ValidPath<i64>| {
                    get_one(table, admin, state, id)
                },
            )
            .put(
                move |State(state): State<Arc<AppState>>,
                      ValidPath(id): ValidPath<i64>,
                      JsonBody(form): JsonBody<NameForm>| {
                    update(table, state, id, form)
                },
            )
            .delete(
                move |State(state): State<Arc<AppState>>, ValidPath(id): ValidPath<i64>| {
                    delete(table, state, id)
                },
            ),
        )
}

/// Tag, cuisine type and social channel routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/tags/autocomplete", get(autocomplete_tags))
        .merge(table_router(NamedTable::Tag, &TAG))
        .merge(table_router(NamedTable::CuisineType, &CUISINE_TYPE))
        .merge(table_router(NamedTable::SocialChannel, &SOCIAL_CHANNEL))
}
