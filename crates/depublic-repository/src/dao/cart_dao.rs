//! CartDao trait.

use async_trait::async_trait;
use depublic_core::{Cart, CartId, DepublicResult, UserId};

/// Low-level cart data access object.
#[async_trait]
pub trait CartDao: Send + Sync {
    /// Lists every cart line.
    async fn find_all(&self) -> DepublicResult<Vec<Cart>>;

    /// Finds a cart line by ID.
    async fn find_by_id(&self, id: CartId) -> DepublicResult<Option<Cart>>;

    /// Lists one user's cart lines, oldest first.
    async fn find_by_user(&self, user_id: UserId) -> DepublicResult<Vec<Cart>>;

    /// Persists a new cart line.
    async fn create(&self, cart: &Cart) -> DepublicResult<Cart>;

    /// Updates quantity, date and price. Fails with `NotFound` if the line is gone.
    async fn update(&self, cart: &Cart) -> DepublicResult<Cart>;

    /// Deletes a cart line, returning the removed row.
    async fn delete(&self, id: CartId) -> DepublicResult<Option<Cart>>;

    /// Deletes every line owned by `user_id`. Returns how many were removed.
    async fn clear_for_user(&self, user_id: UserId) -> DepublicResult<u64>;
}
