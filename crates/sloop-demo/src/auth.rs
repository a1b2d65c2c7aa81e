//! Token gate for the auth demo.
//!
//! Every request needs an `Authorization: Bearer <token>` header issued by
//! `POST /auth/login`, except the login endpoints themselves, the OpenAPI
//! document and the documentation page. Only the page is exempt, not the
//! files under the prefix, so the UI runs with `inline_resources` on: the
//! stylesheet and script arrive inside the page instead of as separate,
//! gated requests.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::RwLock;

use sloop_core::assets::INDEX_HTML;
use sloop_server::error::AppError;

use crate::openapi::API_DOCS_PATH;

/// Length of issued session tokens.
const TOKEN_LEN: usize = 32;

/// Issued session tokens. Lost on restart.
#[derive(Debug, Default)]
pub struct SessionStore {
    tokens: RwLock<HashSet<String>>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token.
    pub async fn open(&self) -> String {
        let token: String = std::iter::repeat_with(fastrand::alphanumeric)
            .take(TOKEN_LEN)
            .collect();
        self.tokens.write().await.insert(token.clone());
        token
    }

    /// Whether `token` is a live session.
    pub async fn contains(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }

    /// End a session. Returns whether it existed.
    pub async fn close(&self, token: &str) -> bool {
        self.tokens.write().await.remove(token)
    }
}

/// The bearer token from an `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware state: the session store and the paths reachable without one.
#[derive(Debug)]
pub struct AuthGate {
    sessions: Arc<SessionStore>,
    docs_pages: Vec<String>,
}

impl AuthGate {
    /// Gate requests against `sessions`, leaving the documentation page
    /// under `route_prefix` (already normalized) open.
    pub fn new(sessions: Arc<SessionStore>, route_prefix: &str) -> Self {
        let base = if route_prefix.is_empty() {
            String::new()
        } else {
            format!("/{route_prefix}")
        };
        let mut docs_pages = vec![format!("{base}/"), format!("{base}/{INDEX_HTML}")];
        if !base.is_empty() {
            docs_pages.push(base);
        }
        Self {
            sessions,
            docs_pages,
        }
    }

    /// Whether `path` is reachable without a session.
    ///
    /// `/auth/*` and the docs page match one level only; the OpenAPI
    /// document matches at any depth.
    pub fn is_public(&self, path: &str) -> bool {
        if let Some(rest) = path.strip_prefix("/auth/") {
            return !rest.contains('/');
        }
        if path == API_DOCS_PATH
            || path
                .strip_prefix(API_DOCS_PATH)
                .is_some_and(|rest| rest.starts_with('/'))
        {
            return true;
        }
        self.docs_pages.iter().any(|page| page == path)
    }
}

/// Middleware that rejects requests without a live session token.
pub async fn auth_middleware(
    State(gate): State<Arc<AuthGate>>,
    req: Request,
    next: Next,
) -> Response {
    if gate.is_public(req.uri().path()) {
        return next.run(req).await;
    }

    let Some(token) = bearer_token(req.headers()) else {
        tracing::debug!(path = %req.uri().path(), "request without session rejected");
        return AppError::Unauthorized("login required".to_owned()).into_response();
    };

    if gate.sessions.contains(token).await {
        next.run(req).await
    } else {
        tracing::debug!(path = %req.uri().path(), "request with unknown session rejected");
        AppError::Unauthorized("invalid or expired session".to_owned()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn gate(prefix: &str) -> AuthGate {
        AuthGate::new(Arc::new(SessionStore::new()), prefix)
    }

    #[test]
    fn docs_page_is_public_but_its_assets_are_not() {
        let gate = gate("swagger");
        assert!(gate.is_public("/swagger"));
        assert!(gate.is_public("/swagger/"));
        assert!(gate.is_public("/swagger/index.html"));
        assert!(!gate.is_public("/swagger/swagger-sloop.css"));
        assert!(!gate.is_public("/swagger/swagger-sloop.js"));
    }

    #[test]
    fn auth_and_api_docs_paths_are_public() {
        let gate = gate("swagger");
        assert!(gate.is_public("/auth/login"));
        assert!(gate.is_public("/auth/captcha"));
        assert!(!gate.is_public("/auth/nested/path"));
        assert!(gate.is_public("/v3/api-docs"));
        assert!(gate.is_public("/v3/api-docs/swagger-config"));
        assert!(!gate.is_public("/v3/api-docsx"));
        assert!(!gate.is_public("/api/v1/users"));
    }

    #[test]
    fn root_prefix_opens_only_the_page() {
        let gate = gate("");
        assert!(gate.is_public("/"));
        assert!(gate.is_public("/index.html"));
        assert!(!gate.is_public("/swagger-sloop.css"));
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));
    }

    #[tokio::test]
    async fn sessions_open_and_close() {
        let store = SessionStore::new();
        let token = store.open().await;
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(store.contains(&token).await);
        assert!(store.close(&token).await);
        assert!(!store.contains(&token).await);
        assert!(!store.close(&token).await);
    }
}
