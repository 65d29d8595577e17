//! HTTP client for the remote postal-address API.
//!
//! # Responsibilities
//! - Exchange credentials for a bearer token
//! - Look up an address by postal or digital-address code
//! - Search addresses by free text
//! - Return status and body untouched; interpretation is the caller's job

use std::time::{Duration, Instant};

use axum::http::header::CONTENT_TYPE;
use reqwest::RequestBuilder;
use serde_json::json;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::token::credentials::Credentials;
use crate::upstream::types::{Endpoint, UpstreamInitError, UpstreamResponse};

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Client for the token, code-search and free-text endpoints.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    token_url: Url,
    code_search_url: Url,
    freeword_search_url: Url,
    forwarded_for: String,
}

impl UpstreamClient {
    /// Create a client from configuration. Endpoint URLs are resolved once here.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamInitError> {
        let base = parse_url(&config.base_url)?;
        let join = |path: &str| {
            base.join(path).map_err(|source| UpstreamInitError::Url {
                url: format!("{}{}", config.base_url, path),
                source,
            })
        };

        let code_search_url = join(&config.code_search_path)?;
        if code_search_url.cannot_be_a_base() {
            return Err(UpstreamInitError::NotABase(code_search_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            token_url: join(&config.token_path)?,
            code_search_url,
            freeword_search_url: join(&config.freeword_search_path)?,
            forwarded_for: config.forwarded_for.clone(),
        })
    }

    /// POST the credentials document, as written, to the token endpoint.
    pub async fn request_token(
        &self,
        credentials: &Credentials,
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let request = self
            .http
            .post(self.token_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(X_FORWARDED_FOR, &self.forwarded_for)
            .body(credentials.as_json().to_owned());

        self.send(Endpoint::Token, request).await
    }

    /// GET the code-search endpoint with `code` as the final path segment.
    pub async fn search_by_code(
        &self,
        token: &str,
        code: &str,
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let url = self.code_search_url_for(code);
        let request = self.authorized(self.http.get(url), token);

        self.send(Endpoint::CodeSearch, request).await
    }

    /// POST `{"freeword": ...}` to the free-text search endpoint.
    pub async fn search_by_freeword(
        &self,
        token: &str,
        freeword: &str,
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let request = self
            .authorized(self.http.post(self.freeword_search_url.clone()), token)
            .json(&json!({ "freeword": freeword }));

        self.send(Endpoint::FreewordSearch, request).await
    }

    /// Code-search URL for a code, percent-encoded as one path segment.
    pub fn code_search_url_for(&self, code: &str) -> Url {
        let mut url = self.code_search_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(code);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .bearer_auth(token)
            .header(X_FORWARDED_FOR, &self.forwarded_for)
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let start = Instant::now();
        let result = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(UpstreamResponse { status, body })
        }
        .await;

        match &result {
            Ok(response) => {
                tracing::debug!(
                    endpoint = endpoint.as_str(),
                    status = %response.status,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream call completed"
                );
                metrics::record_upstream_call(endpoint.as_str(), response.status.as_u16(), start);
            }
            Err(e) => {
                tracing::warn!(endpoint = endpoint.as_str(), error = %e, "Upstream call failed");
                metrics::record_upstream_call(endpoint.as_str(), 0, start);
            }
        }

        result
    }
}

fn parse_url(raw: &str) -> Result<Url, UpstreamInitError> {
    Url::parse(raw).map_err(|source| UpstreamInitError::Url {
        url: raw.to_string(),
        source,
    })
}
