//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → gateway.toml or --config (loader.rs, optional)
//!     → HOST / PORT (env or flags)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow running with no config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{resolve_config, ConfigError, ListenerOverrides};
pub use schema::{
    FilesConfig, GatewayConfig, ListenerConfig, LogFormat, ObservabilityConfig, UpstreamConfig,
};
