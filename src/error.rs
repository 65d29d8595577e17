//! Request-path error taxonomy and its HTTP mapping.

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::http::response::json_relay;

/// Errors surfaced to `/api` callers.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The operator has not provided a credentials file.
    #[error("missing credentials")]
    MissingCredentials,

    /// The token endpoint answered with a non-success status.
    /// Status and body are forwarded unchanged.
    #[error("upstream returned {status}")]
    Upstream { status: StatusCode, body: Bytes },

    /// Network-level failure talking to the upstream API.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Local file I/O failed (credentials read, cache write).
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Credentials file is not valid JSON.
    #[error("invalid credentials file: {0}")]
    InvalidCredentials(serde_json::Error),

    /// The token endpoint returned 2xx with a body we cannot use.
    #[error("invalid token response: {0}")]
    InvalidTokenResponse(String),
}

/// Result type for the request path.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::MissingCredentials => {
                tracing::warn!("Credentials file not found");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "credentials.json not found" })),
                )
                    .into_response()
            }
            GatewayError::Upstream { status, body } => {
                tracing::warn!(status = %status, "Token endpoint rejected request");
                json_relay(status, body)
            }
            other => {
                tracing::error!(error = %other, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": other.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
