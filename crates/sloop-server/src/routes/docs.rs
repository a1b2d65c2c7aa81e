//! Documentation UI routes: `/{prefix}`, `/{prefix}/`, `/{prefix}/index.html`
//! and `/{prefix}/{*path}`.
//!
//! The bare prefix redirects to the trailing-slash form so the page's
//! relative asset links (`./swagger-sloop.css`) resolve under the prefix.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;

use sloop_core::assets::{INDEX_HTML, normalize_name};

use crate::error::AppError;
use crate::state::DocsState;

/// Build the docs router.
///
/// The state is applied here, so the result merges into an application
/// router of any state type. A disabled UI yields an empty router.
pub fn router<S>(state: Arc<DocsState>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if !state.enabled {
        tracing::info!("documentation UI disabled");
        return Router::new();
    }

    let base = if state.route_prefix.is_empty() {
        String::new()
    } else {
        format!("/{}", state.route_prefix)
    };
    tracing::info!(prefix = %format!("{base}/"), "documentation UI mounted");

    let mut router: Router<Arc<DocsState>> = Router::new()
        .route(&format!("{base}/"), get(index))
        .route(&format!("{base}/{INDEX_HTML}"), get(index))
        .route(&format!("{base}/{{*path}}"), get(asset));

    if !base.is_empty() {
        let target = format!("{base}/");
        router = router.route(
            &base,
            get(move || {
                let target = target.clone();
                async move { Redirect::permanent(&target) }
            }),
        );
    }

    router.with_state(state)
}

/// Render the documentation page.
async fn index(State(state): State<Arc<DocsState>>) -> Result<Html<String>, AppError> {
    let html = state.page.render().await?;
    Ok(Html(html))
}

/// Serve a raw asset from the page's asset source.
async fn asset(
    State(state): State<Arc<DocsState>>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound(format!("asset '{path}' not found"));
    let name = normalize_name(&path).ok_or_else(not_found)?;

    // Never serve the unrendered template.
    if name == INDEX_HTML {
        return index(State(state)).await.map(IntoResponse::into_response);
    }

    let bytes = state
        .page
        .source()
        .load_bytes(&name)
        .await?
        .ok_or_else(not_found)?;

    let mime = mime_guess::from_path(&name).first_or_octet_stream();

    Ok((
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CACHE_CONTROL,
                "no-cache, no-store, must-revalidate".to_owned(),
            ),
            (header::PRAGMA, "no-cache".to_owned()),
        ],
        bytes,
    )
        .into_response())
}
