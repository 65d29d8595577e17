//! Address lookup gateway library.
//!
//! Serves a single-page frontend and proxies `/api` lookups to a remote
//! postal-address API, managing the API's bearer token on the caller's behalf.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod security;
pub mod token;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
