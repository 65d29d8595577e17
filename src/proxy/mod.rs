//! Address lookup proxy.
//!
//! # Data Flow
//! ```text
//! GET /api?search_code=...
//!     → handler.rs (extract query, request ID)
//!     → AddressProxy::lookup
//!         → TokenProvider::get_token
//!         → routing::classify
//!         → UpstreamClient (code search | free-text search)
//!     → relay status + body as JSON
//! ```

pub mod handler;

use std::sync::Arc;

use crate::error::GatewayResult;
use crate::routing::{classify, QueryKind};
use crate::token::TokenProvider;
use crate::upstream::{UpstreamClient, UpstreamResponse};

pub use handler::address_lookup;

/// Resolves a search string against the upstream API.
#[derive(Debug)]
pub struct AddressProxy {
    tokens: Arc<TokenProvider>,
    upstream: UpstreamClient,
}

impl AddressProxy {
    pub fn new(tokens: Arc<TokenProvider>, upstream: UpstreamClient) -> Self {
        Self { tokens, upstream }
    }

    /// Look up `search_code`. Non-2xx answers from the search endpoints are
    /// returned as ordinary responses; only local and token failures are errors.
    pub async fn lookup(&self, search_code: &str) -> GatewayResult<(QueryKind, UpstreamResponse)> {
        let token = self.tokens.get_token().await?;

        let kind = classify(search_code);
        let response = match kind {
            QueryKind::ZipOrCode => self.upstream.search_by_code(&token, search_code).await?,
            QueryKind::FreeText => self.upstream.search_by_freeword(&token, search_code).await?,
        };

        Ok((kind, response))
    }
}
