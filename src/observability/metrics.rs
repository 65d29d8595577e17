//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): `/api` requests by query kind
//! - `gateway_token_cache_hits_total` (counter): tokens served from cache
//! - `gateway_token_refresh_total` (counter): refresh attempts by outcome
//! - `gateway_upstream_requests_total` (counter): upstream calls by endpoint, status
//! - `gateway_upstream_duration_seconds` (histogram): upstream latency by endpoint
//!
//! Recording is a no-op until a recorder is installed, so library code and
//! tests can call these freely.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and start its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus metrics endpoint started");
    Ok(())
}

pub fn record_request(kind: &'static str) {
    metrics::counter!("gateway_requests_total", "kind" => kind).increment(1);
}

pub fn record_cache_hit() {
    metrics::counter!("gateway_token_cache_hits_total").increment(1);
}

pub fn record_token_refresh(outcome: &'static str) {
    metrics::counter!("gateway_token_refresh_total", "outcome" => outcome).increment(1);
}

/// `status` is 0 when no response was received.
pub fn record_upstream_call(endpoint: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_upstream_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("gateway_upstream_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}
