//! `WishlistRepositoryImpl`: cached wishlist repository.
//!
//! Only the full listing is cached (`GetAllWishlists`); the `(event, user)`
//! lookup backs the add/remove toggle and must see the latest row.

use crate::cache::{cache_keys, CacheStore, ReadThroughCache};
use crate::{dao::WishlistDao, traits::WishlistRepository};
use async_trait::async_trait;
use depublic_core::{DepublicResult, EventId, UserId, Wishlist};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Repository implementation that caches [`WishlistDao`] reads.
pub struct WishlistRepositoryImpl {
    wishlist_dao: Arc<dyn WishlistDao>,
    cache: ReadThroughCache,
}

impl WishlistRepositoryImpl {
    #[must_use]
    pub fn new(wishlist_dao: Arc<dyn WishlistDao>, store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            wishlist_dao,
            cache: ReadThroughCache::new(store, ttl, "wishlist"),
        }
    }
}

#[async_trait]
impl WishlistRepository for WishlistRepositoryImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Wishlist>> {
        debug!("Repository: find_all wishlists");
        self.cache
            .fetch(cache_keys::ALL_WISHLISTS, || self.wishlist_dao.find_all())
            .await
    }

    async fn find_by_event_and_user(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> DepublicResult<Option<Wishlist>> {
        self.wishlist_dao
            .find_by_event_and_user(event_id, user_id)
            .await
    }

    async fn create(&self, wishlist: &Wishlist) -> DepublicResult<Wishlist> {
        debug!("Repository: add event {} to wishlist", wishlist.event_id);
        let created = self.wishlist_dao.create(wishlist).await?;
        self.cache.invalidate(&[cache_keys::ALL_WISHLISTS]).await;
        Ok(created)
    }

    async fn remove(&self, event_id: EventId, user_id: UserId) -> DepublicResult<bool> {
        debug!("Repository: remove event {} from wishlist", event_id);
        let removed = self.wishlist_dao.remove(event_id, user_id).await?;
        self.cache.invalidate(&[cache_keys::ALL_WISHLISTS]).await;
        Ok(removed)
    }
}

impl std::fmt::Debug for WishlistRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistRepositoryImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
