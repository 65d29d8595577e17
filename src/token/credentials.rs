//! Operator-provided client credentials.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::value::RawValue;

use crate::error::{GatewayError, GatewayResult};

/// Credentials payload. The schema belongs to the upstream API, so the
/// document is only checked to be JSON and is otherwise kept byte-for-byte.
#[derive(Debug, Clone)]
pub struct Credentials(Box<RawValue>);

impl Credentials {
    pub fn parse(raw: String) -> GatewayResult<Self> {
        RawValue::from_string(raw)
            .map(Self)
            .map_err(GatewayError::InvalidCredentials)
    }

    /// The document exactly as the operator wrote it.
    pub fn as_json(&self) -> &str {
        self.0.get()
    }
}

/// Reads the credentials file. Nothing is cached: every call hits the disk.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> GatewayResult<Credentials> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Credentials::parse(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(GatewayError::MissingCredentials),
            Err(e) => Err(GatewayError::Io(e)),
        }
    }
}
