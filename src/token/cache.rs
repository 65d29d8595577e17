//! Single-slot token cache and its persistence.
//!
//! # Responsibilities
//! - Persist the last token-endpoint response together with its issue time
//! - Answer "is there a usable token right now?"
//! - Degrade any unreadable or corrupt record to "no token"
//!
//! # Design Decisions
//! - Storage and clock are injected (`TokenStore`, `Clock`)
//! - The upstream body is stored verbatim inside an envelope that carries
//!   `issued_at`; a bare body from older deployments is still read, with
//!   the file modification time standing in for `issued_at`
//! - One slot only: every write replaces the previous record

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{GatewayError, GatewayResult};
use crate::token::clock::{unix_secs, Clock};

/// The fields of a token-endpoint response this gateway depends on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRecord {
    pub token: String,
    pub expires_in: i64,
}

/// A token record and the moment it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub record: TokenRecord,
    pub issued_at: i64,
}

impl CachedToken {
    pub fn is_valid(&self, now: i64) -> bool {
        is_valid(&self.record, self.issued_at, now)
    }
}

/// A record is usable while `now < issued_at + expires_in`.
pub fn is_valid(record: &TokenRecord, issued_at: i64, now: i64) -> bool {
    now < issued_at.saturating_add(record.expires_in)
}

/// Raw bytes held by a store plus the time the store last wrote them.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub contents: Vec<u8>,
    pub modified: Option<i64>,
}

/// Durable slot for the cached token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> io::Result<Option<StoredBlob>>;

    async fn save(&self, contents: &[u8]) -> io::Result<()>;
}

/// Stores the token as a file, creating parent directories on write.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> io::Result<Option<StoredBlob>> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let modified = tokio::fs::metadata(&self.path)
            .await
            .and_then(|m| m.modified())
            .ok()
            .map(unix_secs);

        Ok(Some(StoredBlob { contents, modified }))
    }

    async fn save(&self, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, contents).await
    }
}

/// Keeps the token in process memory.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<Vec<u8>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents, if any.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.slot.lock().map(|slot| slot.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> io::Result<Option<StoredBlob>> {
        Ok(self.contents().map(|contents| StoredBlob {
            contents,
            modified: None,
        }))
    }

    async fn save(&self, contents: &[u8]) -> io::Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| io::Error::other("token store lock poisoned"))?;
        *slot = Some(contents.to_vec());
        Ok(())
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    issued_at: i64,
    response: &'a RawValue,
}

#[derive(Deserialize)]
struct Envelope {
    issued_at: i64,
    response: Box<RawValue>,
}

/// The token cache: a store, a clock, and the record format between them.
#[derive(Clone)]
pub struct TokenCache {
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl TokenCache {
    pub fn new(store: Arc<dyn TokenStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> i64 {
        self.clock.now_secs()
    }

    /// Read the stored record. Missing, unreadable or corrupt data is `None`.
    pub async fn read(&self) -> Option<CachedToken> {
        let blob = match self.store.load().await {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(error = %e, "Token cache unreadable, treating as empty");
                return None;
            }
        };

        if let Ok(envelope) = serde_json::from_slice::<Envelope>(&blob.contents) {
            return match serde_json::from_str::<TokenRecord>(envelope.response.get()) {
                Ok(record) => Some(CachedToken {
                    record,
                    issued_at: envelope.issued_at,
                }),
                Err(e) => {
                    tracing::debug!(error = %e, "Cached token response malformed, treating as empty");
                    None
                }
            };
        }

        // Bare upstream body: the write time is the issue time.
        match (serde_json::from_slice::<TokenRecord>(&blob.contents), blob.modified) {
            (Ok(record), Some(issued_at)) => Some(CachedToken { record, issued_at }),
            _ => {
                tracing::debug!("Token cache contents not recognised, treating as empty");
                None
            }
        }
    }

    /// Read the stored record only if it is still usable.
    pub async fn read_valid(&self) -> Option<CachedToken> {
        let now = self.now();
        self.read().await.filter(|cached| cached.is_valid(now))
    }

    /// Persist a token-endpoint response body, stamping it as issued now.
    ///
    /// The body must carry a string `token` and an integer `expires_in`;
    /// anything else is rejected before the store is touched.
    pub async fn write(&self, body: &[u8]) -> GatewayResult<CachedToken> {
        let raw: &RawValue = serde_json::from_slice(body)
            .map_err(|e| GatewayError::InvalidTokenResponse(e.to_string()))?;
        let record: TokenRecord = serde_json::from_str(raw.get())
            .map_err(|e| GatewayError::InvalidTokenResponse(e.to_string()))?;

        let issued_at = self.now();
        let envelope = serde_json::to_vec(&EnvelopeRef {
            issued_at,
            response: raw,
        })
        .map_err(|e| GatewayError::InvalidTokenResponse(e.to_string()))?;

        self.store.save(&envelope).await?;

        Ok(CachedToken { record, issued_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::clock::ManualClock;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    const NOW: i64 = 1_700_000_000;
    const BODY: &[u8] = br#"{"scope":"J1","token_type":"Bearer","expires_in":3600,"token":"tok-1"}"#;

    fn memory_cache() -> (TokenCache, Arc<MemoryTokenStore>, Arc<ManualClock>) {
        let store = Arc::new(MemoryTokenStore::new());
        let clock = Arc::new(ManualClock::new(NOW));
        let cache = TokenCache::new(store.clone(), clock.clone());
        (cache, store, clock)
    }

    #[test]
    fn test_validity_boundary() {
        let record = TokenRecord {
            token: "t".into(),
            expires_in: 3600,
        };
        assert!(is_valid(&record, NOW, NOW));
        assert!(is_valid(&record, NOW, NOW + 3599));
        assert!(!is_valid(&record, NOW, NOW + 3600));
        assert!(!is_valid(&record, NOW, NOW + 3601));
    }

    #[test]
    fn test_non_positive_lifetime_never_valid() {
        let record = TokenRecord {
            token: "t".into(),
            expires_in: 0,
        };
        assert!(!is_valid(&record, NOW, NOW));
    }

    #[tokio::test]
    async fn test_empty_cache() {
        let (cache, _, _) = memory_cache();
        assert!(cache.read().await.is_none());
        assert!(cache.read_valid().await.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let (cache, store, clock) = memory_cache();

        let written = cache.write(BODY).await.unwrap();
        assert_eq!(written.record.token, "tok-1");
        assert_eq!(written.issued_at, NOW);

        clock.advance(10);
        let cached = cache.read_valid().await.unwrap();
        assert_eq!(cached, written);

        let stored: serde_json::Value = serde_json::from_slice(&store.contents().unwrap()).unwrap();
        assert_eq!(stored["issued_at"], NOW);
        assert_eq!(stored["response"]["token_type"], "Bearer");
    }

    #[tokio::test]
    async fn test_upstream_body_stored_verbatim() {
        let (cache, store, _) = memory_cache();
        cache.write(BODY).await.unwrap();

        let stored = String::from_utf8(store.contents().unwrap()).unwrap();
        assert!(stored.contains(std::str::from_utf8(BODY).unwrap()));
    }

    #[tokio::test]
    async fn test_expired_record_is_not_valid() {
        let (cache, _, clock) = memory_cache();
        cache.write(BODY).await.unwrap();

        clock.advance(3601);
        assert!(cache.read().await.is_some());
        assert!(cache.read_valid().await.is_none());
    }

    #[tokio::test]
    async fn test_rejects_unusable_body_without_writing() {
        let (cache, store, _) = memory_cache();

        let bodies: [&[u8]; 3] = [
            br#"{"expires_in":3600}"#,
            br#"{"token":"t","expires_in":"soon"}"#,
            b"not json",
        ];
        for body in bodies {
            let err = cache.write(body).await.unwrap_err();
            assert!(matches!(err, GatewayError::InvalidTokenResponse(_)));
        }
        assert!(store.contents().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_store_reads_as_empty() {
        let (cache, store, _) = memory_cache();

        store.save(b"{ truncated").await.unwrap();
        assert!(cache.read().await.is_none());

        store.save(br#"{"issued_at":1,"response":{"nope":true}}"#).await.unwrap();
        assert!(cache.read().await.is_none());
    }

    #[tokio::test]
    async fn test_file_store_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(".cache").join("token.json");
        let cache = TokenCache::new(
            Arc::new(FileTokenStore::new(&path)),
            Arc::new(ManualClock::new(NOW)),
        );

        cache.write(BODY).await.unwrap();
        assert!(path.exists());
        assert_eq!(cache.read_valid().await.unwrap().record.token, "tok-1");
    }

    #[tokio::test]
    async fn test_bare_body_uses_modification_time() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, BODY).unwrap();

        let written_at = SystemTime::now() - Duration::from_secs(10);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(written_at)
            .unwrap();

        let issued_at = unix_secs(written_at);
        let clock = Arc::new(ManualClock::new(issued_at + 10));
        let cache = TokenCache::new(Arc::new(FileTokenStore::new(&path)), clock.clone());

        let cached = cache.read_valid().await.unwrap();
        assert_eq!(cached.issued_at, issued_at);
        assert_eq!(cached.record.token, "tok-1");

        clock.set(issued_at + 3601);
        assert!(cache.read_valid().await.is_none());
    }
}
