//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port non-zero, timeout > 0)
//! - Check that the upstream URL and endpoint paths can be joined
//!   (`base_url` is an origin only; the endpoint paths are absolute)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("upstream.base_url '{0}' is not a valid http(s) URL")]
    InvalidBaseUrl(String),

    #[error("upstream.base_url '{0}' must not carry a path; endpoint paths are absolute")]
    BaseUrlHasPath(String),

    #[error("upstream.{field} '{value}' must start with '/'")]
    InvalidEndpointPath { field: &'static str, value: String },

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("files.{0} must not be empty")]
    EmptyPath(&'static str),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let upstream = &config.upstream;
    match Url::parse(&upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            if url.path() != "/" {
                errors.push(ValidationError::BaseUrlHasPath(upstream.base_url.clone()));
            }
        }
        _ => errors.push(ValidationError::InvalidBaseUrl(upstream.base_url.clone())),
    }

    for (field, value) in [
        ("token_path", &upstream.token_path),
        ("code_search_path", &upstream.code_search_path),
        ("freeword_search_path", &upstream.freeword_search_path),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError::InvalidEndpointPath {
                field,
                value: value.clone(),
            });
        }
    }

    if upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let files = &config.files;
    for (field, value) in [
        ("credentials_path", &files.credentials_path),
        ("token_cache_path", &files.token_cache_path),
        ("frontend_path", &files.frontend_path),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyPath(field));
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
