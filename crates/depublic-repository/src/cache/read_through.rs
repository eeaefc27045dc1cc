//! Generic read-through and invalidate primitives.

use super::metrics::CacheMetrics;
use super::{CacheCodec, CacheStore, JsonCodec};
use depublic_core::DepublicResult;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Read-through cache bound to one entity type.
///
/// Every repository adapter owns one of these over the shared store. Reads go
/// through [`fetch`](Self::fetch); writes call [`invalidate`](Self::invalidate)
/// after the database has accepted them. No cache failure is ever returned
/// from either: the worst a broken cache can do is send every read to the
/// database.
#[derive(Clone)]
pub struct ReadThroughCache<C: CacheCodec = JsonCodec> {
    store: Arc<dyn CacheStore>,
    codec: C,
    ttl: Duration,
    entity: &'static str,
}

impl ReadThroughCache<JsonCodec> {
    /// Creates a JSON-encoding cache for `entity` over a shared store.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration, entity: &'static str) -> Self {
        Self::with_codec(store, JsonCodec, ttl, entity)
    }
}

impl<C: CacheCodec> ReadThroughCache<C> {
    /// Creates a cache with a custom codec.
    #[must_use]
    pub fn with_codec(
        store: Arc<dyn CacheStore>,
        codec: C,
        ttl: Duration,
        entity: &'static str,
    ) -> Self {
        Self {
            store,
            codec,
            ttl,
            entity,
        }
    }

    /// TTL applied to every populated entry.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value under `key`, or runs `load` and caches its result.
    ///
    /// An absent key, an unreachable store and an undecodable entry all fall
    /// through to `load`. Errors from `load` are returned unchanged and leave
    /// the cache untouched.
    pub async fn fetch<T, F, Fut>(&self, key: &str, load: F) -> DepublicResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = DepublicResult<T>> + Send,
    {
        if let Some(cached) = self.lookup::<T>(key).await {
            return Ok(cached);
        }

        let value = load().await?;
        self.populate(key, &value).await;
        Ok(value)
    }

    /// Like [`fetch`](Self::fetch) for lookups that may find nothing.
    ///
    /// A `None` from `load` is returned but not cached, so a row inserted later
    /// is visible on the next read.
    pub async fn fetch_optional<T, F, Fut>(&self, key: &str, load: F) -> DepublicResult<Option<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = DepublicResult<Option<T>>> + Send,
    {
        if let Some(cached) = self.lookup::<T>(key).await {
            return Ok(Some(cached));
        }

        let value = load().await?;
        if let Some(found) = &value {
            self.populate(key, found).await;
        }
        Ok(value)
    }

    /// Removes `keys` after a successful write.
    ///
    /// Failures are logged and counted; the stale entry then lives until its
    /// TTL runs out.
    pub async fn invalidate(&self, keys: &[&str]) {
        for key in keys {
            match self.store.delete(key).await {
                Ok(existed) => {
                    debug!(entity = self.entity, key = *key, existed, "Cache invalidated");
                    CacheMetrics::invalidated(self.entity);
                }
                Err(e) => {
                    warn!(
                        entity = self.entity,
                        key = *key,
                        error = %e,
                        "Cache invalidation failed; entry may be stale until TTL expiry"
                    );
                    CacheMetrics::invalidation_failed(self.entity);
                }
            }
        }
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key).await {
            Ok(Some(bytes)) => match self.codec.decode::<T>(&bytes) {
                Ok(value) => {
                    debug!(entity = self.entity, key, "Cache hit");
                    CacheMetrics::hit(self.entity);
                    Some(value)
                }
                Err(e) => {
                    warn!(entity = self.entity, key, error = %e, "Discarding corrupt cache entry");
                    CacheMetrics::miss(self.entity, e.miss_reason());
                    None
                }
            },
            Ok(None) => {
                debug!(entity = self.entity, key, "Cache miss");
                CacheMetrics::miss(self.entity, "absent");
                None
            }
            Err(e) => {
                warn!(entity = self.entity, key, error = %e, "Cache lookup failed; reading from database");
                CacheMetrics::miss(self.entity, e.miss_reason());
                None
            }
        }
    }

    async fn populate<T: Serialize + Sync>(&self, key: &str, value: &T) {
        let bytes = match self.codec.encode(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(entity = self.entity, key, error = %e, "Failed to encode cache value");
                CacheMetrics::populate_failed(self.entity);
                return;
            }
        };

        match self.store.set(key, &bytes, self.ttl).await {
            Ok(()) => debug!(entity = self.entity, key, ttl_secs = self.ttl.as_secs(), "Cache populated"),
            Err(e) => {
                warn!(entity = self.entity, key, error = %e, "Failed to populate cache");
                CacheMetrics::populate_failed(self.entity);
            }
        }
    }
}

impl<C: CacheCodec> std::fmt::Debug for ReadThroughCache<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadThroughCache")
            .field("entity", &self.entity)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheError, InMemoryCacheStore, MockCacheStore, DEFAULT_TTL};
    use depublic_core::{Category, DepublicError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn categories(names: &[&str]) -> Vec<Category> {
        names.iter().map(|name| Category::new(*name)).collect()
    }

    fn cache_over(store: Arc<dyn CacheStore>) -> ReadThroughCache {
        ReadThroughCache::new(store, DEFAULT_TTL, "category")
    }

    async fn load_counted(
        calls: &AtomicUsize,
        rows: Vec<Category>,
    ) -> DepublicResult<Vec<Category>> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(rows)
    }

    #[tokio::test]
    async fn test_miss_populates_then_hit_skips_loader() {
        let store = Arc::new(InMemoryCacheStore::new());
        let cache = cache_over(store.clone());
        let rows = categories(&["Music", "Sports"]);
        let calls = AtomicUsize::new(0);

        let first = cache
            .fetch("GetAllCategories", || load_counted(&calls, rows.clone()))
            .await
            .unwrap();
        let second = cache
            .fetch("GetAllCategories", || load_counted(&calls, rows.clone()))
            .await
            .unwrap();

        assert_eq!(first, rows);
        assert_eq!(second, rows);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss_and_gets_overwritten() {
        let store = Arc::new(InMemoryCacheStore::new());
        store
            .set("GetAllCategories", b"{not json", DEFAULT_TTL)
            .await
            .unwrap();
        let cache = cache_over(store.clone());
        let rows = categories(&["Music"]);
        let calls = AtomicUsize::new(0);

        let fetched = cache
            .fetch("GetAllCategories", || load_counted(&calls, rows.clone()))
            .await
            .unwrap();
        assert_eq!(fetched, rows);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stored = store.get("GetAllCategories").await.unwrap().unwrap();
        let decoded: Vec<Category> = JsonCodec.decode(&stored).unwrap();
        assert_eq!(decoded, rows);
    }

    #[tokio::test]
    async fn test_broken_store_still_returns_fresh_data() {
        let mut mock = MockCacheStore::new();
        mock.expect_get()
            .returning(|_| Err(CacheError::Unavailable("connection refused".into())));
        mock.expect_set()
            .returning(|_, _, _| Err(CacheError::Timeout { operation: "set", timeout_ms: 250 }));
        let cache = cache_over(Arc::new(mock));
        let rows = categories(&["Music", "Sports", "Theatre"]);
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let fetched = cache
                .fetch("GetAllCategories", || load_counted(&calls, rows.clone()))
                .await
                .unwrap();
            assert_eq!(fetched, rows);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_loader_error_propagates_and_nothing_is_cached() {
        let mut mock = MockCacheStore::new();
        mock.expect_get().returning(|_| Ok(None));
        mock.expect_set().never();
        let cache = cache_over(Arc::new(mock));

        let result: DepublicResult<Vec<Category>> = cache
            .fetch("GetAllCategories", || async {
                Err(DepublicError::Database("connection reset".into()))
            })
            .await;

        assert!(matches!(result, Err(DepublicError::Database(_))));
    }

    #[tokio::test]
    async fn test_fetch_optional_does_not_cache_absence() {
        let store = Arc::new(InMemoryCacheStore::new());
        let cache = cache_over(store.clone());

        let missing: Option<Category> = cache
            .fetch_optional("GetCategoryByID:x", || async { Ok(None) })
            .await
            .unwrap();
        assert!(missing.is_none());
        assert!(store.is_empty());

        let music = Category::new("Music");
        let found = cache
            .fetch_optional("GetCategoryByID:x", || {
                let music = music.clone();
                async move { Ok(Some(music)) }
            })
            .await
            .unwrap();
        assert_eq!(found, Some(music));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_removes_every_key() {
        let store = Arc::new(InMemoryCacheStore::new());
        store.set("a", b"1", DEFAULT_TTL).await.unwrap();
        store.set("b", b"2", DEFAULT_TTL).await.unwrap();
        store.set("c", b"3", DEFAULT_TTL).await.unwrap();
        let cache = cache_over(store.clone());

        cache.invalidate(&["a", "b", "missing"]).await;

        assert_eq!(store.len(), 1);
        assert!(store.get("c").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalidate_swallows_store_errors() {
        let mut mock = MockCacheStore::new();
        mock.expect_delete()
            .times(2)
            .returning(|_| Err(CacheError::Unavailable("down".into())));
        let cache = cache_over(Arc::new(mock));

        cache.invalidate(&["GetAllCategories", "GetCategoryByID:x"]).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_is_reloaded_after_ttl() {
        let store: Arc<dyn CacheStore> = Arc::new(InMemoryCacheStore::new());
        let cache = cache_over(store);
        let rows = categories(&["Music"]);
        let calls = AtomicUsize::new(0);

        cache
            .fetch("GetAllCategories", || load_counted(&calls, rows.clone()))
            .await
            .unwrap();
        tokio::time::advance(DEFAULT_TTL - Duration::from_secs(1)).await;
        cache
            .fetch("GetAllCategories", || load_counted(&calls, rows.clone()))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        cache
            .fetch("GetAllCategories", || load_counted(&calls, rows.clone()))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
