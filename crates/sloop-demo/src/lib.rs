//! Swagger Sloop sample application.
//!
//! A small REST API (users CRUD and a weather forecast) that publishes its
//! OpenAPI document at `/v3/api-docs` and mounts the documentation UI next
//! to it. The auth variant puts the API behind a bearer-token gate that
//! leaves only the documentation page open.

pub mod auth;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod store;
