//! Article endpoints
//!
//! CRUD plus the `make_published` bulk action.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{pagination, search, ChangeResponse};
use crate::admin::ARTICLE;
use crate::db::repos::{Article, ArticleFilter, ArticleRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidPath, ValidQuery};
use crate::http::server::AppState;
use crate::models::{ArticleForm, Paginated, ValidationError};

/// Changelist query: search, flag filters and date drill-down
#[derive(Debug, Default, Deserialize)]
pub struct ArticleQuery {
    pub q: Option<String>,
    pub show_at_index: Option<bool>,
    pub is_published: Option<bool>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ArticleQuery {
    fn filter(&self) -> Result<ArticleFilter, ValidationError> {
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(ValidationError::OutOfRange {
                    field: "month",
                    reason: "must be between 1 and 12".to_string(),
                });
            }
        }

        Ok(ArticleFilter {
            q: search(&ARTICLE, self.q.as_deref()).map(str::to_owned),
            show_at_index: self.show_at_index,
            is_published: self.is_published,
            year: self.year,
            month: self.month,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub action: &'static str,
    pub updated: u64,
}

/// GET /admin/articles
async fn list_articles(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<ArticleQuery>,
) -> Result<Json<Paginated<Article>>, ApiError> {
    let filter = query.filter()?;
    let page = pagination(query.page, query.per_page);
    let result = ArticleRepo::new(&state.pool).list(&filter, page).await?;
    Ok(Json(result))
}

/// POST /admin/articles
async fn create_article(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<ArticleForm>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let draft = form.validate()?;
    let article = ArticleRepo::new(&state.pool).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

/// GET /admin/articles/{id} - change view
async fn get_article(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<ChangeResponse<Article>>, ApiError> {
    let article = ArticleRepo::new(&state.pool).get(id).await?;
    let display = article.display_name();
    Ok(Json(ChangeResponse::new(&ARTICLE, id, article, display)))
}

/// PUT /admin/articles/{id}
async fn update_article(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
    JsonBody(form): JsonBody<ArticleForm>,
) -> Result<Json<Article>, ApiError> {
    let draft = form.validate()?;
    let article = ArticleRepo::new(&state.pool).update(id, &draft).await?;
    Ok(Json(article))
}

/// DELETE /admin/articles/{id}
async fn delete_article(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<StatusCode, ApiError> {
    ArticleRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/articles/actions/{action}
async fn run_action(
    State(state): State<Arc<AppState>>,
    ValidPath(name): ValidPath<String>,
    JsonBody(req): JsonBody<ActionRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let action = ARTICLE
        .action(&name)
        .ok_or_else(|| ApiError::NotFound {
            resource: "action",
            id: name.clone(),
        })?;

    let updated = match action.name {
        "make_published" => ArticleRepo::new(&state.pool).publish(&req.ids).await?,
        other => {
            return Err(ApiError::Internal {
                message: format!("action '{}' has no handler", other),
            })
        }
    };

    Ok(Json(ActionResponse {
        action: action.name,
        updated,
    }))
}

/// Article routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/articles", get(list_articles).post(create_article))
        .route(
            "/admin/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route("/admin/articles/actions/{action}", post(run_action))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::send;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let (status, body) = send("GET", "/admin/articles/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn empty_title_rejected_before_write() {
        let (status, body) = send(
            "POST",
            "/admin/articles",
            Some(r#"{"title": "  ", "content": "body"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "title cannot be empty");
    }

    #[tokio::test]
    async fn invalid_month_rejected() {
        let (status, body) = send("GET", "/admin/articles?year=2024&month=13", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn unknown_action_is_404() {
        let (status, _) = send(
            "POST",
            "/admin/articles/actions/delete_everything",
            Some(r#"{"ids": [1]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn action_requires_ids() {
        let (status, body) = send(
            "POST",
            "/admin/articles/actions/make_published",
            Some(r#"{"selected": [1]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }
}
