//! Answer cache: key derivation and the cache store seam.
//!
//! Answers are keyed by a digest of the *raw* query text so that only a
//! byte-identical repeat short-circuits the pipeline. Two stores are
//! provided: Redis for deployments and an in-process map used as fallback
//! and in tests.

use async_trait::async_trait;
use redis::AsyncCommands;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tributary_core::{AppError, AppResult};

/// Derive the cache key for a query: lowercase hex SHA-256 of its raw bytes.
///
/// No normalization is applied; keys are case-sensitive on purpose, so
/// identical bytes always map to the same key and nothing else does.
pub fn cache_key(query: &str) -> String {
    hex::encode(Sha256::digest(query.as_bytes()))
}

/// The cache store seam.
///
/// Absence of a key is a valid non-error outcome; errors mean the store
/// itself misbehaved. The pipeline treats both get and set failures as
/// non-fatal.
#[async_trait]
pub trait AnswerCache: Send + Sync {
    /// Look up a cached answer.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store an answer under `key` for `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;
}

/// Redis-backed answer cache (GET / SET EX).
pub struct RedisCache {
    manager: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Connect to Redis at `url`.
    ///
    /// The multiplexed connection manager reconnects on its own; per-call
    /// clones of it are cheap handles onto the same connection.
    pub async fn connect(url: &str) -> AppResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| AppError::Cache(format!("Invalid Redis URL: {}", e)))?;

        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| AppError::Cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl AnswerCache for RedisCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| AppError::Cache(format!("Redis GET failed: {}", e)))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let _: () = conn
            .set_ex(key, value, ttl.as_secs())
            .await
            .map_err(|e| AppError::Cache(format!("Redis SET failed: {}", e)))?;
        Ok(())
    }
}

/// In-process answer cache with per-entry expiry.
///
/// Fallback when no Redis URL is configured, and the store of choice in
/// tests. Expired entries are dropped lazily on lookup.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerCache for MemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some((value, expires_at)) if Instant::now() < *expires_at => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_deterministic() {
        assert_eq!(cache_key("find user_10"), cache_key("find user_10"));
    }

    #[test]
    fn test_cache_key_is_case_sensitive() {
        assert_ne!(cache_key("find user_10"), cache_key("Find user_10"));
    }

    #[test]
    fn test_cache_key_shape() {
        let key = cache_key("any query");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_memory_cache_round_trip() {
        let cache = MemoryCache::new();
        let key = cache_key("q");

        cache
            .set(&key, "answer", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some("answer"));
    }

    #[tokio::test]
    async fn test_memory_cache_absent_key() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_expiry() {
        let cache = MemoryCache::new();
        let key = cache_key("q");

        cache
            .set(&key, "answer", Duration::from_millis(40))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(cache.get(&key).await.unwrap(), None);
    }
}
