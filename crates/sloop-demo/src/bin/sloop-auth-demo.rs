//! Swagger Sloop auth demo entry point.
//!
//! Same API as `sloop-demo`, behind a bearer-token gate. Only `/auth/*`,
//! `/v3/api-docs` and the documentation page are reachable without logging
//! in, and the page inlines its stylesheet and script.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use sloop_demo::routes::{auth_demo_settings, build_auth_router};
use sloop_demo::state::DemoState;
use sloop_server::config::ServerConfig;
use sloop_server::runtime::{init_tracing, shutdown_signal};
use sloop_server::state::DocsState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ServerConfig::from_env().context("invalid configuration")?;
    config.sloop = auth_demo_settings(config.sloop);

    init_tracing(&config.log_level);
    info!(settings = ?config.sloop, "Swagger Sloop auth demo starting");

    let docs_state = Arc::new(DocsState::from_config(&config));
    let app = build_auth_router(Arc::new(DemoState::seeded()), docs_state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        docs = %format!("/{}/", config.sloop.normalized_route_prefix()),
        login = "POST /auth/login {\"username\":\"admin\",\"password\":\"123456\"}",
        "Swagger Sloop auth demo listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Swagger Sloop auth demo stopped");
    Ok(())
}
