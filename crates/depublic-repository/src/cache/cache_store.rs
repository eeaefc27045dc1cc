//! Key-value store abstraction behind the read-through cache.

use async_trait::async_trait;
use depublic_core::DepublicError;
use std::time::Duration;
use thiserror::Error;

/// Failures of the cache layer. None of these reach repository callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Store unreachable or refused the command.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Store did not answer within the operation timeout.
    #[error("Cache {operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },

    /// Stored bytes do not decode into the requested shape.
    #[error("Corrupt cache entry: {0}")]
    Corrupt(String),

    /// Value could not be encoded for storage.
    #[error("Failed to encode cache value: {0}")]
    Encode(String),
}

impl CacheError {
    /// Metric label describing why a lookup turned into a miss.
    #[must_use]
    pub const fn miss_reason(&self) -> &'static str {
        match self {
            Self::Unavailable(_) | Self::Encode(_) => "unavailable",
            Self::Timeout { .. } => "timeout",
            Self::Corrupt(_) => "corrupt",
        }
    }
}

impl From<CacheError> for DepublicError {
    fn from(err: CacheError) -> Self {
        Self::Cache(err.to_string())
    }
}

/// Minimal key-value store with per-entry TTL.
///
/// Implementations must be safe to call from many tasks at once; per-key
/// atomicity is the only consistency the cache layer relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored bytes, or `None` if the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Returns `true` if an entry existed.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Checks the store is reachable.
    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_reasons() {
        assert_eq!(CacheError::Unavailable("down".into()).miss_reason(), "unavailable");
        assert_eq!(
            CacheError::Timeout { operation: "get", timeout_ms: 250 }.miss_reason(),
            "timeout"
        );
        assert_eq!(CacheError::Corrupt("eof".into()).miss_reason(), "corrupt");
    }

    #[test]
    fn test_converts_into_cache_error() {
        let err: DepublicError = CacheError::Unavailable("connection refused".into()).into();
        assert_eq!(err.error_code(), "CACHE_ERROR");
        assert!(err.to_string().contains("connection refused"));
    }
}
