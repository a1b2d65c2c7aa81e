//! Integration tests for the demo application router.
//!
//! These drive the full router (API, OpenAPI document and docs UI) in
//! process through `tower::ServiceExt::oneshot`; no listener is bound.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use sloop_core::config::SloopSettings;
use sloop_demo::routes::{build_router, demo_settings};
use sloop_demo::state::DemoState;
use sloop_server::state::DocsState;

fn app() -> Router {
    let settings = demo_settings(SloopSettings::default());
    build_router(
        Arc::new(DemoState::seeded()),
        Arc::new(DocsState::embedded(&settings)),
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(req.body(body).unwrap()).await.unwrap()
}

async fn json_body(res: Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(res: Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ── Users ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_seeded_users() {
    let app = app();
    let res = send(&app, "GET", "/api/v1/users", None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let users = json_body(res).await;
    assert_eq!(users.as_array().unwrap().len(), 2);
    assert_eq!(users[0]["name"], "John Doe");
}

#[tokio::test]
async fn test_user_crud_lifecycle() {
    let app = app();

    let res = send(
        &app,
        "POST",
        "/api/v1/users",
        Some(json!({ "name": "Ada", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()[header::LOCATION], "/api/v1/users/3");
    let created = json_body(res).await;
    assert_eq!(created["id"], 3);

    let res = send(
        &app,
        "PUT",
        "/api/v1/users/3",
        Some(json!({ "name": "Ada L.", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["name"], "Ada L.");

    let res = send(&app, "GET", "/api/v1/users/3", None).await;
    assert_eq!(json_body(res).await["name"], "Ada L.");

    let res = send(&app, "DELETE", "/api/v1/users/3", None).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(&app, "GET", "/api/v1/users/3", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res).await["error"], "not_found");
}

#[tokio::test]
async fn test_blank_fields_rejected() {
    let app = app();
    let res = send(
        &app,
        "POST",
        "/api/v1/users",
        Some(json!({ "name": "  ", "email": "x@example.com" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["error"], "bad_request");
}

#[tokio::test]
async fn test_update_and_delete_unknown_user() {
    let app = app();
    let res = send(
        &app,
        "PUT",
        "/api/v1/users/99",
        Some(json!({ "name": "Nobody", "email": "n@example.com" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app, "DELETE", "/api/v1/users/99", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

// ── Weather ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_default_forecast_has_five_days() {
    let app = app();
    let res = send(&app, "GET", "/api/v1/weatherforecast", None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let days = json_body(res).await;
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 5);
    assert!(days[0].get("temperatureC").is_some());
    assert!(days[0].get("temperatureF").is_some());
}

#[tokio::test]
async fn test_forecast_day_count() {
    let app = app();
    let res = send(&app, "GET", "/api/v1/weatherforecast/3", None).await;
    assert_eq!(json_body(res).await.as_array().unwrap().len(), 3);

    let res = send(&app, "GET", "/api/v1/weatherforecast/0", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(&app, "GET", "/api/v1/weatherforecast/1000", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ── Docs ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app();
    let res = send(&app, "GET", "/v3/api-docs", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["info"]["title"], "Sample API");
}

#[tokio::test]
async fn test_docs_ui_points_at_own_document() {
    let app = app();
    let res = send(&app, "GET", "/swagger/", None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = text_body(res).await;
    assert!(html.contains("<title>Sample API Documentation</title>"));
    assert!(html.contains(r#"[{"url":"/v3/api-docs","name":"Sample API V1"}]"#));
}

#[tokio::test]
async fn test_docs_redirect_and_assets() {
    let app = app();
    let res = send(&app, "GET", "/swagger", None).await;
    assert_eq!(res.status(), StatusCode::PERMANENT_REDIRECT);

    let res = send(&app, "GET", "/swagger/swagger-sloop.css", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
}

#[test]
fn test_demo_settings_keep_operator_choices() {
    let mut settings = SloopSettings::default();
    settings.render.document_title = "Mine".to_owned();
    settings.render = settings.render.swagger_endpoint("/other.json", "Other");

    let settings = demo_settings(settings);
    assert_eq!(settings.render.document_title, "Mine");
    assert_eq!(settings.render.swagger_endpoints.len(), 1);
    assert_eq!(settings.render.swagger_endpoints[0].url, "/other.json");
}
