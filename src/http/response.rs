//! Response construction.
//!
//! # Design Decisions
//! - Upstream bodies are relayed byte-for-byte, never re-serialized
//! - Every `/api` response is labelled `application/json`, whatever the
//!   upstream said

use axum::{
    body::{Body, Bytes},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Relay a status and raw body as a JSON response.
pub fn json_relay(status: StatusCode, body: Bytes) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Body::from(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_relay_preserves_status_and_bytes() {
        let raw = Bytes::from_static(b"{\"addresses\": [ ]}\n");
        let response = json_relay(StatusCode::NOT_FOUND, raw.clone());

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, raw);
    }
}
