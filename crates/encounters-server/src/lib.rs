//! HTTP front end for the fatal encounters database.
//!
//! Each route turns its query string into an [`encounters::Query`], runs it on
//! a pooled connection and answers with JSON. Filters that a request does not
//! set, or sets to something unparsable, simply drop out of the SQL.

pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod params;
pub mod router;
pub mod routes;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Parse configuration, connect, and serve until the process is stopped.
pub async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::load();
    logging::init();
    serve(config).await
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let pool = encounters::create_pool_with_config(&config.database_url, config.pool_size)
        .context("failed to create connection pool")?;
    let addr = config.socket_addr()?;
    let state = Arc::new(AppState::new(pool, &config));
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, pool_size = config.pool_size, page_size = config.page_size, "listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
