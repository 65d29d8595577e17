//! Token management subsystem.
//!
//! # Data Flow
//! ```text
//! provider.rs get_token()
//!     → cache.rs read_valid()      hit → token
//!     → credentials.rs load()      miss → credentials (fresh from disk)
//!     → upstream token endpoint    non-2xx → forwarded unchanged
//!     → cache.rs write()           2xx → persisted with issued_at
//! ```

pub mod cache;
pub mod clock;
pub mod credentials;
pub mod provider;

pub use cache::{CachedToken, FileTokenStore, MemoryTokenStore, TokenCache, TokenRecord, TokenStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::{CredentialStore, Credentials};
pub use provider::TokenProvider;
