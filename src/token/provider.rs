//! Bearer-token acquisition.
//!
//! # Responsibilities
//! - Serve the cached token while it is valid
//! - Otherwise exchange the credentials for a new token and cache it
//! - Forward upstream rejections unchanged
//!
//! # Design Decisions
//! - Refreshes are single-flight per process: a mutex is held across the
//!   upstream call and the cache is re-read after acquiring it, so a burst
//!   of requests arriving with an expired token costs one token request
//! - The cached-token fast path never takes the lock

use tokio::sync::Mutex;

use crate::error::{GatewayError, GatewayResult};
use crate::observability::metrics;
use crate::token::cache::TokenCache;
use crate::token::credentials::CredentialStore;
use crate::upstream::UpstreamClient;

#[derive(Debug)]
pub struct TokenProvider {
    credentials: CredentialStore,
    cache: TokenCache,
    upstream: UpstreamClient,
    refresh_lock: Mutex<()>,
}

impl TokenProvider {
    pub fn new(credentials: CredentialStore, cache: TokenCache, upstream: UpstreamClient) -> Self {
        Self {
            credentials,
            cache,
            upstream,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Return a usable bearer token, refreshing it if needed.
    pub async fn get_token(&self) -> GatewayResult<String> {
        if let Some(cached) = self.cache.read_valid().await {
            metrics::record_cache_hit();
            return Ok(cached.record.token);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another request may have refreshed while we waited.
        if let Some(cached) = self.cache.read_valid().await {
            metrics::record_cache_hit();
            return Ok(cached.record.token);
        }

        self.refresh().await
    }

    async fn refresh(&self) -> GatewayResult<String> {
        let credentials = match self.credentials.load().await {
            Ok(credentials) => credentials,
            Err(e) => {
                metrics::record_token_refresh("config_error");
                return Err(e);
            }
        };

        tracing::info!("Requesting new access token");
        let response = match self.upstream.request_token(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_token_refresh("network_error");
                return Err(e.into());
            }
        };

        if !response.is_success() {
            metrics::record_token_refresh("rejected");
            return Err(GatewayError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        let cached = self.cache.write(&response.body).await.inspect_err(|_| {
            metrics::record_token_refresh("not_cached");
        })?;
        metrics::record_token_refresh("success");
        tracing::info!(expires_in = cached.record.expires_in, "Access token refreshed");

        Ok(cached.record.token)
    }
}
