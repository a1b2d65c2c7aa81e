//! Session routes for the auth demo: `/auth/*`

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sloop_server::error::AppError;

use crate::auth::bearer_token;
use crate::openapi::ErrorResponse;
use crate::state::DemoState;

/// The one account the demo accepts.
const DEMO_USERNAME: &str = "admin";
const DEMO_PASSWORD: &str = "123456";

/// Build the `/auth` router.
pub fn router() -> Router<Arc<DemoState>> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/captcha", get(captcha))
        .route("/check", get(check))
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "123456")]
    pub password: String,
}

/// A freshly issued session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Send as `Authorization: Bearer <token>`.
    pub token: String,
}

/// A simulated captcha challenge.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CaptchaResponse {
    #[schema(example = "K7Q2ZD")]
    pub captcha: String,
}

/// Whether the caller holds a live session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionStatus {
    pub logged_in: bool,
}

/// Log in with the demo account.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in",
    description = "Exchanges the demo credentials (admin / 123456) for a bearer token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Wrong username or password", body = ErrorResponse)
    )
)]
pub(crate) async fn login(
    State(state): State<Arc<DemoState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if body.username != DEMO_USERNAME || body.password != DEMO_PASSWORD {
        tracing::info!(username = %body.username, "login rejected");
        return Err(AppError::Unauthorized("invalid username or password".to_owned()));
    }
    let token = state.sessions.open().await;
    tracing::info!(username = %body.username, "session opened");
    Ok(Json(LoginResponse { token }))
}

/// End the caller's session.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Log out",
    description = "Invalidates the bearer token sent with the request",
    responses((status = 204, description = "Session closed"))
)]
pub(crate) async fn logout(
    State(state): State<Arc<DemoState>>,
    headers: HeaderMap,
) -> StatusCode {
    if let Some(token) = bearer_token(&headers) {
        if state.sessions.close(token).await {
            tracing::info!("session closed");
        }
    }
    StatusCode::NO_CONTENT
}

/// Issue a captcha. Nothing checks it; the login form just shows it.
#[utoipa::path(
    get,
    path = "/auth/captcha",
    tag = "Auth",
    operation_id = "captcha",
    summary = "Get captcha",
    description = "Returns a simulated captcha challenge",
    responses((status = 200, description = "Challenge text", body = CaptchaResponse))
)]
pub(crate) async fn captcha() -> Json<CaptchaResponse> {
    let captcha = std::iter::repeat_with(|| fastrand::alphanumeric().to_ascii_uppercase())
        .take(6)
        .collect();
    Json(CaptchaResponse { captcha })
}

/// Report whether the request carries a live session.
#[utoipa::path(
    get,
    path = "/auth/check",
    tag = "Auth",
    operation_id = "checkLogin",
    summary = "Check login state",
    responses((status = 200, description = "Session state", body = SessionStatus))
)]
pub(crate) async fn check(
    State(state): State<Arc<DemoState>>,
    headers: HeaderMap,
) -> Json<SessionStatus> {
    let logged_in = match bearer_token(&headers) {
        Some(token) => state.sessions.contains(token).await,
        None => false,
    };
    Json(SessionStatus { logged_in })
}
