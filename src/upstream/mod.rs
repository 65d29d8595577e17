//! Remote postal-address API.
//!
//! # Data Flow
//! ```text
//! TokenProvider ──credentials──▶ client.rs ──POST token──────────▶ API
//! AddressProxy  ──bearer token─▶ client.rs ──GET code / POST text─▶ API
//!                                    ◀── UpstreamResponse (status + raw body)
//! ```

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{Endpoint, UpstreamInitError, UpstreamResponse};
