//! Read-through / invalidate-on-write caching.
//!
//! ```text
//! Repository adapter
//!   ↓  ReadThroughCache::fetch / invalidate
//! CacheCodec (JSON)
//!   ↓
//! Arc<dyn CacheStore>  ── RedisCacheStore | InMemoryCacheStore
//! ```
//!
//! The cache is best-effort. Store outages, timeouts and undecodable entries
//! all read as misses, and failed populates or invalidations are logged and
//! counted but never returned to the caller.

mod cache_store;
pub mod cache_keys;
mod memory_cache;
pub mod metrics;
mod read_through;
mod redis_cache;
mod serializer;

pub use cache_store::{CacheError, CacheStore};
#[cfg(test)]
pub use cache_store::MockCacheStore;
pub use memory_cache::InMemoryCacheStore;
pub use read_through::ReadThroughCache;
pub use redis_cache::RedisCacheStore;
pub use serializer::{CacheCodec, JsonCodec};

use std::time::Duration;

/// Default TTL for cached query results (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default bound on a single cache round trip.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(250);
