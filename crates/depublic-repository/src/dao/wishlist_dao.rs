//! WishlistDao trait.

use async_trait::async_trait;
use depublic_core::{DepublicResult, EventId, UserId, Wishlist};

/// Low-level wishlist data access object.
///
/// A wishlist row is identified by its `(event_id, user_id)` pair.
#[async_trait]
pub trait WishlistDao: Send + Sync {
    async fn find_all(&self) -> DepublicResult<Vec<Wishlist>>;

    async fn find_by_event_and_user(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> DepublicResult<Option<Wishlist>>;

    /// Fails with `Conflict` if the pair is already wishlisted.
    async fn create(&self, wishlist: &Wishlist) -> DepublicResult<Wishlist>;

    /// Returns `true` if a row was removed.
    async fn remove(&self, event_id: EventId, user_id: UserId) -> DepublicResult<bool>;
}
