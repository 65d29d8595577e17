//! Response header policy.
//!
//! # Responsibilities
//! - Permissive CORS on every response, including 204s and static assets
//!
//! # Design Decisions
//! - Plain `*` headers instead of a CORS middleware: preflight requests
//!   must still reach the method guard and get its 204

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue,
    },
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Add `Access-Control-Allow-{Origin,Methods,Headers}: *` to every response.
pub fn permissive_cors<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let any = HeaderValue::from_static("*");
    router
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            any.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            any.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            any,
        ))
}
