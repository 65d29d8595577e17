//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use address_gateway::config::GatewayConfig;
use address_gateway::http::HttpServer;
use address_gateway::lifecycle::Shutdown;
use tempfile::TempDir;
use tokio::net::TcpListener;
use wiremock::MockServer;

pub const FRONTEND: &str = "<!doctype html><html><body><div id=\"app\"></div></body></html>";
pub const CREDENTIALS: &str =
    r#"{"grant_type":"client_credentials","client_id":"test-client","secret_key":"test-secret"}"#;

/// A gateway bound to an ephemeral port, with its own working files and a
/// fake upstream API.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub upstream: MockServer,
    pub client: reqwest::Client,
    pub dir: TempDir,
    shutdown: Shutdown,
}

impl TestGateway {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    pub async fn start_with(customize: impl FnOnce(&mut GatewayConfig)) -> Self {
        let upstream = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), FRONTEND).unwrap();

        let mut config = GatewayConfig::default();
        config.listener.host = "127.0.0.1".into();
        config.upstream.base_url = upstream.uri();
        config.files.frontend_path = path_string(dir.path().join("index.html"));
        config.files.credentials_path = path_string(dir.path().join("credentials.json"));
        config.files.token_cache_path = path_string(dir.path().join(".cache").join("token.json"));
        customize(&mut config);

        let server = HttpServer::new(config).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()
            .unwrap();

        Self {
            addr,
            upstream,
            client,
            dir,
            shutdown,
        }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.dir.path().join("credentials.json")
    }

    pub fn token_cache_path(&self) -> PathBuf {
        self.dir.path().join(".cache").join("token.json")
    }

    pub fn write_credentials(&self) {
        std::fs::write(self.credentials_path(), CREDENTIALS).unwrap();
    }

    /// Seed the token cache as if `token` had been issued `age_secs` ago.
    pub fn seed_token(&self, token: &str, expires_in: i64, age_secs: i64) {
        let path = self.token_cache_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let record = format!(
            r#"{{"issued_at":{},"response":{{"token":"{}","expires_in":{}}}}}"#,
            now_secs() - age_secs,
            token,
            expires_in
        );
        std::fs::write(path, record).unwrap();
    }

    /// The token-endpoint response currently cached, if any.
    pub fn cached_response(&self) -> Option<serde_json::Value> {
        let raw = std::fs::read(self.token_cache_path()).ok()?;
        let envelope: serde_json::Value = serde_json::from_slice(&raw).ok()?;
        envelope.get("response").cloned()
    }

    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        self.client
            .get(self.url(path_and_query))
            .send()
            .await
            .expect("gateway unreachable")
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}
