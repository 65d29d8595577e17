//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so that an absent config file is a valid setup.

use serde::{Deserialize, Serialize};

/// Root configuration for the address gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Local files read and written by the gateway.
    pub files: FilesConfig,

    /// Remote postal-address API settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to bind.
    pub port: u16,
}

impl ListenerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Address shown to operators. A wildcard bind is displayed as loopback.
    pub fn display_address(&self) -> String {
        let host = if self.host == "0.0.0.0" {
            "127.0.0.1"
        } else {
            self.host.as_str()
        };
        format!("http://{}:{}", host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Paths of the files the gateway touches, relative to the working directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Operator-provided client credentials (opaque JSON).
    pub credentials_path: String,

    /// Single-slot token cache.
    pub token_cache_path: String,

    /// Single-page frontend served for every non-API GET.
    pub frontend_path: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            credentials_path: "credentials.json".to_string(),
            token_cache_path: ".cache/token.json".to_string(),
            frontend_path: "static/index.html".to_string(),
        }
    }
}

/// Remote address API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme and authority of the API (e.g., "https://api.example.jp").
    /// Any path prefix belongs in the endpoint paths below.
    pub base_url: String,

    /// Token endpoint (POST, credentials in).
    pub token_path: String,

    /// Code search endpoint prefix (GET, code appended as a path segment).
    pub code_search_path: String,

    /// Free-text search endpoint (POST, `{"freeword": ...}`).
    pub freeword_search_path: String,

    /// Value pinned into `X-Forwarded-For` on every upstream call.
    pub forwarded_for: String,

    /// Overall timeout for a single upstream call in seconds.
    pub timeout_secs: u64,

    /// User-Agent sent upstream.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.da.pf.japanpost.jp".to_string(),
            token_path: "/api/v1/j/token".to_string(),
            code_search_path: "/api/v1/searchcode".to_string(),
            freeword_search_path: "/api/v1/addresszip".to_string(),
            forwarded_for: "127.0.0.1".to_string(),
            timeout_secs: 30,
            user_agent: concat!("address-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Address for the Prometheus scrape endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Text,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.listener.port, 8000);
        assert_eq!(config.files.credentials_path, "credentials.json");
        assert_eq!(config.upstream.forwarded_for, "127.0.0.1");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_display_address() {
        let mut listener = ListenerConfig::default();
        assert_eq!(listener.display_address(), "http://127.0.0.1:8000");
        assert_eq!(listener.bind_address(), "0.0.0.0:8000");

        listener.host = "192.168.1.10".into();
        listener.port = 9000;
        assert_eq!(listener.display_address(), "http://192.168.1.10:9000");
    }

    #[test]
    fn test_partial_toml() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "http://localhost:9999"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "http://localhost:9999");
        assert_eq!(config.upstream.token_path, "/api/v1/j/token");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.listener.port, 8000);
    }
}
