//! `lingomap serve`

use anyhow::{Context, Result};
use lingomap_core::Config;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::server::{AppState, router};

/// Serve sitemaps until interrupted.
///
/// # Errors
///
/// Returns an error if the index cannot be opened or the address cannot be bound.
pub async fn execute(config: &Config, bind: Option<SocketAddr>) -> Result<()> {
    let loader = super::open_loader(config)?;
    let app = router(AppState::new(
        loader,
        config.server.public_base_url.clone(),
    ));

    let addr = bind.unwrap_or(config.server.bind);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Serving sitemaps on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
