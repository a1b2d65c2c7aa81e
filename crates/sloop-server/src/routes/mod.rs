//! HTTP route modules for the Swagger Sloop server.

pub mod docs;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::DocsState;

/// Build the standalone server router: the docs routes plus request tracing
/// and response hardening headers.
pub fn build_router(state: Arc<DocsState>) -> Router {
    docs::router::<()>(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}
