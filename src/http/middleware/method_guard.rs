//! Method guard middleware.
//! Only GET reaches the handlers; every other verb is answered with an
//! empty 204 and goes no further.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub async fn retrieval_only(req: Request<Body>, next: Next) -> Response {
    if req.method() != Method::GET {
        tracing::debug!(
            method = %req.method(),
            path = %req.uri().path(),
            "Non-GET request answered with 204"
        );
        return StatusCode::NO_CONTENT.into_response();
    }

    next.run(req).await
}
