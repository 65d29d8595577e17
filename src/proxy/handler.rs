//! `/api` request handler.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Extension,
};

use crate::http::request::RequestId;
use crate::http::response::json_relay;
use crate::http::server::AppState;
use crate::observability::metrics;

/// The last `search_code` value in the query, or `""` when there is none.
///
/// Repeated keys are legal in a query string; the final occurrence wins.
pub fn last_search_code(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "search_code").then_some(value))
        .unwrap_or_default()
}

/// Proxy a lookup and relay the upstream answer as JSON.
///
/// A missing or malformed query string is treated as an empty search.
pub async fn address_lookup(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let search_code = query
        .map(|Query(pairs)| last_search_code(pairs))
        .unwrap_or_default();

    match state.proxy.lookup(&search_code).await {
        Ok((kind, upstream)) => {
            metrics::record_request(kind.as_str());
            tracing::info!(
                request_id = %request_id,
                kind = kind.as_str(),
                status = %upstream.status,
                "Address lookup relayed"
            );
            json_relay(upstream.status, upstream.body)
        }
        Err(e) => {
            metrics::record_request("error");
            tracing::warn!(request_id = %request_id, error = %e, "Address lookup failed");
            e.into_response()
        }
    }
}
