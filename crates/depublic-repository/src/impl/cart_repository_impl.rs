//! `CartRepositoryImpl`: cached cart repository.
//!
//! Besides the `GetAllCarts` listing, each user's cart is cached under
//! `GetCartsByUser:{user_id}`; every write touching a line clears its owner's
//! key.

use crate::cache::{cache_keys, CacheStore, ReadThroughCache};
use crate::{dao::CartDao, traits::CartRepository};
use async_trait::async_trait;
use depublic_core::{Cart, CartId, DepublicResult, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Repository implementation that caches [`CartDao`] reads.
pub struct CartRepositoryImpl {
    cart_dao: Arc<dyn CartDao>,
    cache: ReadThroughCache,
}

impl CartRepositoryImpl {
    #[must_use]
    pub fn new(cart_dao: Arc<dyn CartDao>, store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            cart_dao,
            cache: ReadThroughCache::new(store, ttl, "cart"),
        }
    }

    async fn invalidate_owner(&self, user_id: UserId) {
        let key = cache_keys::carts_by_user(user_id);
        self.cache.invalidate(&[cache_keys::ALL_CARTS, &key]).await;
    }
}

#[async_trait]
impl CartRepository for CartRepositoryImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Cart>> {
        debug!("Repository: find_all carts");
        self.cache
            .fetch(cache_keys::ALL_CARTS, || self.cart_dao.find_all())
            .await
    }

    async fn find_by_id(&self, id: CartId) -> DepublicResult<Option<Cart>> {
        debug!("Repository: find_by_id cart {}", id);
        self.cart_dao.find_by_id(id).await
    }

    async fn find_by_user(&self, user_id: UserId) -> DepublicResult<Vec<Cart>> {
        debug!("Repository: find_by_user carts {}", user_id);
        let key = cache_keys::carts_by_user(user_id);
        self.cache
            .fetch(&key, || self.cart_dao.find_by_user(user_id))
            .await
    }

    async fn create(&self, cart: &Cart) -> DepublicResult<Cart> {
        debug!("Repository: create cart for user {}", cart.user_id);
        let created = self.cart_dao.create(cart).await?;
        self.invalidate_owner(created.user_id).await;
        Ok(created)
    }

    async fn update(&self, cart: &Cart) -> DepublicResult<Cart> {
        debug!("Repository: update cart {}", cart.cart_id);
        let updated = self.cart_dao.update(cart).await?;
        self.invalidate_owner(updated.user_id).await;
        Ok(updated)
    }

    async fn delete(&self, id: CartId) -> DepublicResult<bool> {
        debug!("Repository: delete cart {}", id);
        match self.cart_dao.delete(id).await? {
            Some(removed) => {
                self.invalidate_owner(removed.user_id).await;
                Ok(true)
            }
            None => {
                self.cache.invalidate(&[cache_keys::ALL_CARTS]).await;
                Ok(false)
            }
        }
    }

    async fn clear_for_user(&self, user_id: UserId) -> DepublicResult<u64> {
        debug!("Repository: clear carts for user {}", user_id);
        let removed = self.cart_dao.clear_for_user(user_id).await?;
        self.invalidate_owner(user_id).await;
        Ok(removed)
    }
}

impl std::fmt::Debug for CartRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartRepositoryImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
