//! PostgreSQL wishlist DAO.

use crate::{dao::WishlistDao, pool::DatabasePool};
use async_trait::async_trait;
use depublic_core::{DepublicResult, EventId, UserId, Wishlist};
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL implementation of [`WishlistDao`].
#[derive(Clone)]
pub struct PgWishlistDaoImpl {
    pool: Arc<DatabasePool>,
}

impl PgWishlistDaoImpl {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WishlistDao for PgWishlistDaoImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Wishlist>> {
        debug!("Finding all wishlists");

        let rows = sqlx::query_as::<_, Wishlist>(
            "SELECT wishlist_id, user_id, event_id, created_at FROM wishlists ORDER BY created_at",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows)
    }

    async fn find_by_event_and_user(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> DepublicResult<Option<Wishlist>> {
        debug!("Finding wishlist for event {} and user {}", event_id, user_id);

        let row = sqlx::query_as::<_, Wishlist>(
            r#"
            SELECT wishlist_id, user_id, event_id, created_at
            FROM wishlists
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row)
    }

    async fn create(&self, wishlist: &Wishlist) -> DepublicResult<Wishlist> {
        debug!("Adding event {} to wishlist of user {}", wishlist.event_id, wishlist.user_id);

        let row = sqlx::query_as::<_, Wishlist>(
            r#"
            INSERT INTO wishlists (wishlist_id, user_id, event_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING wishlist_id, user_id, event_id, created_at
            "#,
        )
        .bind(wishlist.wishlist_id)
        .bind(wishlist.user_id)
        .bind(wishlist.event_id)
        .bind(wishlist.created_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row)
    }

    async fn remove(&self, event_id: EventId, user_id: UserId) -> DepublicResult<bool> {
        debug!("Removing event {} from wishlist of user {}", event_id, user_id);

        let result = sqlx::query("DELETE FROM wishlists WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for PgWishlistDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgWishlistDaoImpl").finish_non_exhaustive()
    }
}
