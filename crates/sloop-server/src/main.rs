//! Swagger Sloop server entry point.
//!
//! Loads configuration from the environment, builds the docs state and
//! serves the documentation UI with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use sloop_server::config::ServerConfig;
use sloop_server::routes;
use sloop_server::runtime::{init_tracing, shutdown_signal};
use sloop_server::state::DocsState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("invalid configuration")?;

    init_tracing(&config.log_level);
    info!(settings = ?config.sloop, "Swagger Sloop starting");

    let state = Arc::new(DocsState::from_config(&config));
    let app = routes::build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        prefix = %config.sloop.normalized_route_prefix(),
        "Swagger Sloop listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Swagger Sloop stopped");
    Ok(())
}
