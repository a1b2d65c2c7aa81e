//! Swagger Sloop HTTP server.
//!
//! Wires the renderer from `sloop-core` into Axum routes. The docs router
//! can be merged into any Axum application; the `sloop-server` binary runs
//! it standalone.

pub mod config;
pub mod error;
pub mod routes;
pub mod runtime;
pub mod state;
