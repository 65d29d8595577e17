//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, method guard, CORS)
//! - Bind server to listener
//! - Route `/api` to the address proxy and everything else to the frontend

use std::path::PathBuf;
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{services::ServeFile, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::middleware::retrieval_only;
use crate::http::request::request_id;
use crate::proxy::{address_lookup, AddressProxy};
use crate::security::permissive_cors;
use crate::token::{CredentialStore, FileTokenStore, SystemClock, TokenCache, TokenProvider};
use crate::upstream::{UpstreamClient, UpstreamInitError};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub proxy: Arc<AddressProxy>,
}

impl AppState {
    /// Production wiring: file-backed credentials and token cache, system clock.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, UpstreamInitError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let cache = TokenCache::new(
            Arc::new(FileTokenStore::new(&config.files.token_cache_path)),
            Arc::new(SystemClock),
        );
        let tokens = Arc::new(TokenProvider::new(
            CredentialStore::new(&config.files.credentials_path),
            cache,
            upstream.clone(),
        ));

        Ok(Self {
            proxy: Arc::new(AddressProxy::new(tokens, upstream)),
        })
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamInitError> {
        let state = AppState::from_config(&config)?;
        Ok(Self::with_state(config, state))
    }

    /// Create a server around pre-built state.
    pub fn with_state(config: GatewayConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let frontend = ServeFile::new(PathBuf::from(&config.files.frontend_path));

        let router = Router::new()
            .route("/api", get(address_lookup))
            .fallback_service(frontend)
            .with_state(state)
            .layer(middleware::from_fn(retrieval_only))
            .layer(middleware::from_fn(request_id))
            .layer(TraceLayer::new_for_http());

        permissive_cors(router)
    }

    /// A clone of the router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
