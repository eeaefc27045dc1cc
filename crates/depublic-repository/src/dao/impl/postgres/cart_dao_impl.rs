//! PostgreSQL cart DAO.

use crate::{dao::CartDao, pool::DatabasePool};
use async_trait::async_trait;
use depublic_core::{Cart, CartId, DepublicError, DepublicResult, UserId};
use std::sync::Arc;
use tracing::debug;

const CART_COLUMNS: &str =
    "cart_id, user_id, event_id, qty, ticket_date, price, created_at, updated_at";

/// PostgreSQL implementation of [`CartDao`].
#[derive(Clone)]
pub struct PgCartDaoImpl {
    pool: Arc<DatabasePool>,
}

impl PgCartDaoImpl {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartDao for PgCartDaoImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Cart>> {
        debug!("Finding all carts");

        let sql = format!("SELECT {CART_COLUMNS} FROM carts ORDER BY created_at");
        let rows = sqlx::query_as::<_, Cart>(&sql)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: CartId) -> DepublicResult<Option<Cart>> {
        debug!("Finding cart by id: {}", id);

        let sql = format!("SELECT {CART_COLUMNS} FROM carts WHERE cart_id = $1");
        let row = sqlx::query_as::<_, Cart>(&sql)
            .bind(id)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row)
    }

    async fn find_by_user(&self, user_id: UserId) -> DepublicResult<Vec<Cart>> {
        debug!("Finding carts for user: {}", user_id);

        let sql =
            format!("SELECT {CART_COLUMNS} FROM carts WHERE user_id = $1 ORDER BY created_at");
        let rows = sqlx::query_as::<_, Cart>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows)
    }

    async fn create(&self, cart: &Cart) -> DepublicResult<Cart> {
        debug!("Creating cart for user {} and event {}", cart.user_id, cart.event_id);

        let sql = format!(
            "INSERT INTO carts ({CART_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {CART_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Cart>(&sql)
            .bind(cart.cart_id)
            .bind(cart.user_id)
            .bind(cart.event_id)
            .bind(cart.qty)
            .bind(cart.ticket_date)
            .bind(cart.price)
            .bind(cart.created_at)
            .bind(cart.updated_at)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(row)
    }

    async fn update(&self, cart: &Cart) -> DepublicResult<Cart> {
        debug!("Updating cart: {}", cart.cart_id);

        let sql = format!(
            "UPDATE carts SET qty = $2, ticket_date = $3, price = $4, updated_at = NOW() \
             WHERE cart_id = $1 RETURNING {CART_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Cart>(&sql)
            .bind(cart.cart_id)
            .bind(cart.qty)
            .bind(cart.ticket_date)
            .bind(cart.price)
            .fetch_optional(self.pool.inner())
            .await?;

        row.ok_or_else(|| DepublicError::not_found("Cart", cart.cart_id))
    }

    async fn delete(&self, id: CartId) -> DepublicResult<Option<Cart>> {
        debug!("Deleting cart: {}", id);

        let sql = format!("DELETE FROM carts WHERE cart_id = $1 RETURNING {CART_COLUMNS}");
        let row = sqlx::query_as::<_, Cart>(&sql)
            .bind(id)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row)
    }

    async fn clear_for_user(&self, user_id: UserId) -> DepublicResult<u64> {
        debug!("Clearing carts for user: {}", user_id);

        let result = sqlx::query("DELETE FROM carts WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }
}

impl std::fmt::Debug for PgCartDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCartDaoImpl").finish_non_exhaustive()
    }
}
