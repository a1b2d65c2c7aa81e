//! HTTP routes for the demo application.

pub mod auth;
pub mod users;
pub mod weather;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::OpenApi;

use sloop_core::config::{RenderConfig, SloopSettings};
use sloop_server::routes::docs;
use sloop_server::state::DocsState;

use crate::auth::{AuthGate, auth_middleware};
use crate::openapi::{self, API_DOCS_PATH};
use crate::state::DemoState;

/// Title shown when the operator did not configure one.
const DEMO_TITLE: &str = "Sample API Documentation";

/// Point the UI at this application's own OpenAPI document unless the
/// operator configured endpoints or a title.
#[must_use]
pub fn demo_settings(mut settings: SloopSettings) -> SloopSettings {
    if settings.render.swagger_endpoints.is_empty() {
        settings.render = settings.render.swagger_endpoint(API_DOCS_PATH, "Sample API V1");
    }
    if settings.render.document_title == RenderConfig::default().document_title {
        DEMO_TITLE.clone_into(&mut settings.render.document_title);
    }
    settings
}

/// [`demo_settings`] with resources inlined. The auth gate leaves only the
/// page open, so the stylesheet and script must travel inside it.
#[must_use]
pub fn auth_demo_settings(settings: SloopSettings) -> SloopSettings {
    let mut settings = demo_settings(settings);
    settings.render.inline_resources = true;
    settings
}

/// Build the demo router: the API, its OpenAPI document and the docs UI.
pub fn build_router(state: Arc<DemoState>, docs_state: Arc<DocsState>) -> Router {
    with_common_layers(api_routes(openapi::document(), docs_state)).with_state(state)
}

/// Build the auth demo router: [`build_router`] plus `/auth/*`, with every
/// other path except the docs page and the OpenAPI document requiring a
/// session.
pub fn build_auth_router(state: Arc<DemoState>, docs_state: Arc<DocsState>) -> Router {
    let gate = Arc::new(AuthGate::new(
        Arc::clone(&state.sessions),
        &docs_state.route_prefix,
    ));

    let router = api_routes(openapi::auth_document(), docs_state)
        .nest("/auth", auth::router())
        .layer(middleware::from_fn_with_state(gate, auth_middleware));

    with_common_layers(router).with_state(state)
}

fn api_routes(document: OpenApi, docs_state: Arc<DocsState>) -> Router<Arc<DemoState>> {
    Router::new()
        .nest("/api/v1/users", users::router())
        .nest("/api/v1/weatherforecast", weather::router())
        .route(
            API_DOCS_PATH,
            get(move || {
                let document = document.clone();
                async move { Json(document) }
            }),
        )
        .merge(docs::router::<Arc<DemoState>>(docs_state))
}

fn with_common_layers(router: Router<Arc<DemoState>>) -> Router<Arc<DemoState>> {
    router
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}
