//! Redis-backed cache store.

use super::{CacheError, CacheStore, DEFAULT_OPERATION_TIMEOUT};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool, PoolConfig, Runtime};
use depublic_config::RedisConfig;
use depublic_core::{DepublicError, DepublicResult};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-backed [`CacheStore`].
///
/// Every command, including checking a connection out of the pool, is bounded
/// by `operation_timeout`; a slow Redis reads as [`CacheError::Timeout`].
#[derive(Clone)]
pub struct RedisCacheStore {
    /// Redis connection pool; `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
    operation_timeout: Duration,
}

impl RedisCacheStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self {
            pool: Some(pool),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Create a store with a custom per-operation timeout.
    #[must_use]
    pub fn with_timeout(pool: Arc<Pool>, operation_timeout: Duration) -> Self {
        Self {
            pool: Some(pool),
            operation_timeout,
        }
    }

    /// Build a pool from configuration. No connection is opened until first use.
    pub fn from_config(config: &RedisConfig, operation_timeout: Duration) -> DepublicResult<Self> {
        let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
        redis_cfg.pool = Some(PoolConfig::new(config.pool_size));
        let pool = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| DepublicError::Cache(format!("Failed to create Redis pool: {}", e)))?;

        info!(url = %config.url, pool_size = config.pool_size, "Redis cache pool created");
        Ok(Self::with_timeout(Arc::new(pool), operation_timeout))
    }

    /// Create a no-op store: every lookup misses, every write succeeds.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Whether a Redis pool is attached.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    /// Round-trips a `PING`.
    pub async fn health_check(&self) -> Result<(), CacheError> {
        let Some(pool) = self.pool.clone() else {
            return Ok(());
        };
        self.bounded("ping", async move {
            let mut conn = checkout(&pool).await?;
            let _pong: String = deadpool_redis::redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| CacheError::Unavailable(format!("PING failed: {}", e)))?;
            Ok(())
        })
        .await
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, CacheError>>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout {
                operation,
                timeout_ms: u64::try_from(self.operation_timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

async fn checkout(pool: &Pool) -> Result<deadpool_redis::Connection, CacheError> {
    pool.get()
        .await
        .map_err(|e| CacheError::Unavailable(format!("Failed to get Redis connection: {}", e)))
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let Some(pool) = &self.pool else {
            return Ok(None);
        };

        let value = self
            .bounded("get", async {
                let mut conn = checkout(pool).await?;
                conn.get::<_, Option<Vec<u8>>>(key).await.map_err(|e| {
                    CacheError::Unavailable(format!("Failed to get key '{}': {}", key, e))
                })
            })
            .await?;

        match &value {
            Some(_) => debug!("Redis hit for key '{}'", key),
            None => debug!("Redis miss for key '{}'", key),
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let Some(pool) = &self.pool else {
            return Ok(());
        };
        let ttl_secs = ttl.as_secs().max(1);

        self.bounded("set", async {
            let mut conn = checkout(pool).await?;
            conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
                CacheError::Unavailable(format!("Failed to set key '{}': {}", key, e))
            })
        })
        .await?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let Some(pool) = &self.pool else {
            return Ok(false);
        };

        let deleted: i64 = self
            .bounded("delete", async {
                let mut conn = checkout(pool).await?;
                conn.del(key).await.map_err(|e| {
                    CacheError::Unavailable(format!("Failed to delete key '{}': {}", key, e))
                })
            })
            .await?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn ping(&self) -> Result<(), CacheError> {
        self.health_check().await
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("enabled", &self.is_enabled())
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}
