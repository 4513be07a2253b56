//! Nested admin routes against a real Postgres
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p matzip-server -- --ignored

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use matzip_server::{build_router, create_pool, migrations, AppState};
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use tower::ServiceExt;

static MIGRATED: OnceCell<()> = OnceCell::const_new();
static COUNTER: AtomicU32 = AtomicU32::new(0);

async fn app() -> Router {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    MIGRATED
        .get_or_init(|| async {
            migrations::run(&pool).await.expect("migrations failed");
        })
        .await;
    let state = AppState {
        pool,
        media_root: PathBuf::from("media"),
    };
    build_router(state, false)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, json) = send(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{uri}: {json}");
    json["id"].as_i64().unwrap()
}

async fn restaurant(app: &Router) -> i64 {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    create(
        app,
        "/admin/restaurants",
        json!({
            "name": format!("평래옥 {}-{}", std::process::id(), n),
            "address": "서울 중구 마른내로 21-1",
            "phone": "+8222674625",
        }),
    )
    .await
}

async fn review(app: &Router, restaurant_id: i64) -> i64 {
    create(
        app,
        "/admin/reviews",
        json!({
            "restaurant_id": restaurant_id,
            "title": "Chicken on the side",
            "author": "seoyeon",
            "content": "Come early.",
            "rating": 4,
        }),
    )
    .await
}

#[tokio::test]
#[ignore = "requires database"]
async fn nested_lists_under_a_missing_parent_are_not_found() {
    let app = app().await;
    let missing = i64::MAX;

    for uri in [
        format!("/admin/restaurants/{missing}/images"),
        format!("/admin/restaurants/{missing}/menus"),
        format!("/admin/reviews/{missing}/images"),
    ] {
        let (status, json) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json["error"], "not_found");
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn children_of_another_parent_are_not_found() {
    let app = app().await;
    let owner = restaurant(&app).await;
    let other = restaurant(&app).await;

    create(
        &app,
        &format!("/admin/restaurants/{owner}/images"),
        json!({"is_representative": true, "image": "front.jpg"}),
    )
    .await;
    let foreign_image = create(
        &app,
        &format!("/admin/restaurants/{other}/images"),
        json!({"image": "hall.jpg"}),
    )
    .await;
    for flag in [true, false] {
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/admin/restaurants/{owner}/images/{foreign_image}"),
            Some(json!({"is_representative": flag, "image": "hall.jpg"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "is_representative={flag}");
    }
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/restaurants/{owner}/images/{foreign_image}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let menu = create(
        &app,
        &format!("/admin/restaurants/{other}/menus"),
        json!({"name": "닭무침", "price": 12000}),
    )
    .await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/admin/restaurants/{owner}/menus/{menu}"),
        Some(json!({"name": "닭무침", "price": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/restaurants/{owner}/menus/{menu}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let own_review = review(&app, owner).await;
    let other_review = review(&app, other).await;
    let shot = create(
        &app,
        &format!("/admin/reviews/{other_review}/images"),
        json!({"name": "plate", "image": "plate.jpg"}),
    )
    .await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/admin/reviews/{own_review}/images/{shot}"),
        Some(json!({"name": "plate", "image": "plate.jpg"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/reviews/{own_review}/images/{shot}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The other restaurant's rows are untouched
    let (_, menus) = send(&app, "GET", &format!("/admin/restaurants/{other}/menus"), None).await;
    assert_eq!(menus[0]["price"], 12000);
    let (_, images) = send(&app, "GET", &format!("/admin/restaurants/{other}/images"), None).await;
    assert_eq!(images[0]["is_representative"], false);
}

#[tokio::test]
#[ignore = "requires database"]
async fn restaurant_change_view_embeds_menus_and_images() {
    let app = app().await;
    let id = restaurant(&app).await;

    let (_, json) = send(&app, "GET", &format!("/admin/restaurants/{id}"), None).await;
    assert_eq!(json["inlines"]["menus"], json!([]));
    assert_eq!(json["inlines"]["images"], json!([]));

    let menu = create(
        &app,
        &format!("/admin/restaurants/{id}/menus"),
        json!({"name": "평양냉면", "price": 14000}),
    )
    .await;
    let image = create(
        &app,
        &format!("/admin/restaurants/{id}/images"),
        json!({"is_representative": true, "image": "sign.jpg"}),
    )
    .await;

    let (status, json) = send(&app, "GET", &format!("/admin/restaurants/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["object"]["id"], id);
    let menus = json["inlines"]["menus"].as_array().unwrap();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0]["id"], menu);
    let images = json["inlines"]["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["id"], image);
    assert_eq!(images[0]["is_representative"], true);
}

#[tokio::test]
#[ignore = "requires database"]
async fn review_change_view_embeds_images() {
    let app = app().await;
    let restaurant_id = restaurant(&app).await;
    let id = review(&app, restaurant_id).await;
    let image = create(
        &app,
        &format!("/admin/reviews/{id}/images"),
        json!({"name": "broth", "image": "broth.jpg"}),
    )
    .await;

    let (status, json) = send(&app, "GET", &format!("/admin/reviews/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["display"], "seoyeon:Chicken on the side");
    let images = json["inlines"]["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["id"], image);
    assert_eq!(images[0]["name"], "broth");
}
