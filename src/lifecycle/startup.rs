//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Build the HTTP server from validated configuration
//! - Bind the listener last, so traffic only arrives when ready
//! - Tie OS signals to graceful shutdown
//!
//! Any startup error is fatal.

use std::error::Error;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Run the gateway until a shutdown signal arrives.
pub async fn run(config: GatewayConfig) -> Result<(), Box<dyn Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        credentials = %config.files.credentials_path,
        token_cache = %config.files.token_cache_path,
        frontend = %config.files.frontend_path,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let display_address = config.listener.display_address();
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(server.config().listener.bind_address()).await?;
    tracing::info!("Serving on {}", display_address);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    signals::wait_for_signal().await;
    shutdown.trigger();

    server_task.await??;
    tracing::info!("Shutdown complete");
    Ok(())
}
