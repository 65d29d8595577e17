//! Security policy applied at the HTTP edge.
//!
//! # Components
//! - `headers.rs`: CORS response headers
//! - `http::middleware::method_guard`: read-only surface (non-GET → 204)

pub mod headers;

pub use headers::permissive_cors;
