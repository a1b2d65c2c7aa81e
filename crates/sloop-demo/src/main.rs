//! Swagger Sloop demo entry point.
//!
//! Serves the sample API at `/api/v1/*`, its OpenAPI document at
//! `/v3/api-docs` and the documentation UI at the configured prefix. Uses
//! the same `SLOOP_*` environment variables as `sloop-server`.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use sloop_demo::routes::{build_router, demo_settings};
use sloop_demo::state::DemoState;
use sloop_server::config::ServerConfig;
use sloop_server::runtime::{init_tracing, shutdown_signal};
use sloop_server::state::DocsState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ServerConfig::from_env().context("invalid configuration")?;
    config.sloop = demo_settings(config.sloop);

    init_tracing(&config.log_level);
    info!(settings = ?config.sloop, "Swagger Sloop demo starting");

    let docs_state = Arc::new(DocsState::from_config(&config));
    let app = build_router(Arc::new(DemoState::seeded()), docs_state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        docs = %format!("/{}/", config.sloop.normalized_route_prefix()),
        "Swagger Sloop demo listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Swagger Sloop demo stopped");
    Ok(())
}
