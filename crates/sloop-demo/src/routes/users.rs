//! User management routes: `/api/v1/users/*`

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use sloop_server::error::AppError;

use crate::openapi::ErrorResponse;
use crate::state::DemoState;
use crate::store::{User, UserRequest};

/// Build the `/api/v1/users` router.
pub fn router() -> Router<Arc<DemoState>> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

fn validate(req: &UserRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_owned()));
    }
    if req.email.trim().is_empty() {
        return Err(AppError::BadRequest("email must not be empty".to_owned()));
    }
    Ok(())
}

fn not_found(id: u64) -> AppError {
    AppError::NotFound(format!("user {id} not found"))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    operation_id = "getUsers",
    summary = "Get all users",
    description = "Returns a list of all users",
    responses((status = 200, description = "All users", body = [User]))
)]
pub(crate) async fn list_users(State(state): State<Arc<DemoState>>) -> Json<Vec<User>> {
    Json(state.users.list().await)
}

/// Get a user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    operation_id = "getUserById",
    summary = "Get user by ID",
    description = "Returns a specific user by their ID",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub(crate) async fn get_user(
    State(state): State<Arc<DemoState>>,
    Path(id): Path<u64>,
) -> Result<Json<User>, AppError> {
    state.users.get(id).await.map(Json).ok_or_else(|| not_found(id))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    operation_id = "createUser",
    summary = "Create user",
    description = "Creates a new user",
    request_body = UserRequest,
    responses(
        (status = 201, description = "Created user", body = User),
        (status = 400, description = "Missing name or email", body = ErrorResponse)
    )
)]
pub(crate) async fn create_user(
    State(state): State<Arc<DemoState>>,
    Json(body): Json<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&body)?;
    let user = state.users.create(body).await;
    tracing::info!(user_id = user.id, "user created");

    let location = format!("/api/v1/users/{}", user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// Replace a user's fields.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    operation_id = "updateUser",
    summary = "Update user",
    description = "Updates an existing user",
    params(("id" = u64, Path, description = "User ID")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Missing name or email", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub(crate) async fn update_user(
    State(state): State<Arc<DemoState>>,
    Path(id): Path<u64>,
    Json(body): Json<UserRequest>,
) -> Result<Json<User>, AppError> {
    validate(&body)?;
    state
        .users
        .update(id, body)
        .await
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    operation_id = "deleteUser",
    summary = "Delete user",
    description = "Deletes a user by their ID",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_user(
    State(state): State<Arc<DemoState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    if state.users.delete(id).await {
        tracing::info!(user_id = id, "user deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
