//! Upstream response and setup error types.

use axum::body::Bytes;
use axum::http::StatusCode;
use thiserror::Error;

/// Status and raw body of an upstream call. The body is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Errors building the upstream client from configuration.
#[derive(Debug, Error)]
pub enum UpstreamInitError {
    #[error("Invalid upstream URL '{url}': {source}")]
    Url {
        url: String,
        source: url::ParseError,
    },

    #[error("Upstream URL '{0}' cannot carry path segments")]
    NotABase(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Upstream endpoints, used as metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Token,
    CodeSearch,
    FreewordSearch,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Token => "token",
            Endpoint::CodeSearch => "code_search",
            Endpoint::FreewordSearch => "freeword_search",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UpstreamInitError::NotABase("mailto:ops@example.com".into());
        assert_eq!(
            err.to_string(),
            "Upstream URL 'mailto:ops@example.com' cannot carry path segments"
        );
    }
}
