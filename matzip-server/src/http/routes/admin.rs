//! Admin index and per-model screen descriptors

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::admin::{ModelAdmin, REGISTRY};
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct AdminIndex {
    /// Directory image paths are relative to
    pub media_root: String,
    pub models: &'static [&'static ModelAdmin],
}

/// GET /admin
async fn index(State(state): State<Arc<AppState>>) -> Json<AdminIndex> {
    Json(AdminIndex {
        media_root: state.media_root.display().to_string(),
        models: REGISTRY,
    })
}

/// GET /admin/{model}/config and GET /admin/{model}/add for every model.
///
/// Registered as static paths so they take priority over `/{id}`.
pub fn router() -> Router<Arc<AppState>> {
    let mut router = Router::new().route("/admin", get(index));

    for &admin in REGISTRY {
        router = router
            .route(
                &format!("/admin/{}/config", admin.path),
                get(move || async move { Json(admin) }),
            )
            .route(
                &format!("/admin/{}/add", admin.path),
                get(move || async move { Json(admin.add_view()) }),
            );
    }

    router
}
