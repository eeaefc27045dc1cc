//! Prometheus metrics for the read-through cache.
//!
//! Cache failures never reach callers, so these counters are the only place
//! a degraded cache shows up.

use metrics::{counter, describe_counter};

/// Metric names for the cache layer.
pub mod names {
    /// Lookups answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "depublic_cache_hits_total";
    /// Lookups that fell through to the database.
    pub const CACHE_MISSES_TOTAL: &str = "depublic_cache_misses_total";
    /// Fresh results that could not be written back.
    pub const CACHE_POPULATE_FAILURES_TOTAL: &str = "depublic_cache_populate_failures_total";
    /// Keys removed after a write.
    pub const CACHE_INVALIDATIONS_TOTAL: &str = "depublic_cache_invalidations_total";
    /// Keys that could not be removed after a write.
    pub const CACHE_INVALIDATION_FAILURES_TOTAL: &str = "depublic_cache_invalidation_failures_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Total number of cache hits");
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Total number of cache misses, labelled by reason"
    );
    describe_counter!(
        names::CACHE_POPULATE_FAILURES_TOTAL,
        "Total number of failed cache writes after a miss"
    );
    describe_counter!(
        names::CACHE_INVALIDATIONS_TOTAL,
        "Total number of cache keys invalidated after a write"
    );
    describe_counter!(
        names::CACHE_INVALIDATION_FAILURES_TOTAL,
        "Total number of cache keys that failed to invalidate after a write"
    );
}

/// Cache metrics recorder.
#[derive(Clone)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a lookup served from the cache.
    pub fn hit(entity: &'static str) {
        counter!(names::CACHE_HITS_TOTAL, "entity" => entity).increment(1);
    }

    /// Record a lookup that went to the database.
    ///
    /// `reason` is `absent`, `unavailable`, `timeout` or `corrupt`.
    pub fn miss(entity: &'static str, reason: &'static str) {
        counter!(names::CACHE_MISSES_TOTAL, "entity" => entity, "reason" => reason).increment(1);
    }

    /// Record a failed write-back.
    pub fn populate_failed(entity: &'static str) {
        counter!(names::CACHE_POPULATE_FAILURES_TOTAL, "entity" => entity).increment(1);
    }

    /// Record a successful invalidation.
    pub fn invalidated(entity: &'static str) {
        counter!(names::CACHE_INVALIDATIONS_TOTAL, "entity" => entity).increment(1);
    }

    /// Record a failed invalidation.
    pub fn invalidation_failed(entity: &'static str) {
        counter!(names::CACHE_INVALIDATION_FAILURES_TOTAL, "entity" => entity).increment(1);
    }
}
