//! Query routing.
//!
//! # Data Flow
//! ```text
//! search_code
//!     → classifier.rs (pure, no I/O)
//!     → QueryKind::ZipOrCode → code-search endpoint
//!     → QueryKind::FreeText  → free-text search endpoint
//! ```

pub mod classifier;

pub use classifier::{classify, QueryKind};
