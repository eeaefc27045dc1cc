//! PostgreSQL transaction DAO.

use crate::{dao::TransactionDao, pool::DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use depublic_core::{
    CartId, DepublicError, DepublicResult, TicketId, Transaction, TransactionId,
    TransactionStatus, UserId,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const TRANSACTION_COLUMNS: &str = "transaction_id, cart_id, user_id, fullname_user, trx_date, \
                                   payment, payment_url, amount, status, created_at, updated_at";

/// PostgreSQL implementation of [`TransactionDao`].
#[derive(Clone)]
pub struct PgTransactionDaoImpl {
    pool: Arc<DatabasePool>,
}

impl PgTransactionDaoImpl {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TransactionRow {
    transaction_id: TransactionId,
    cart_id: CartId,
    user_id: UserId,
    fullname_user: String,
    trx_date: DateTime<Utc>,
    payment: String,
    payment_url: Option<String>,
    amount: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            transaction_id: row.transaction_id,
            cart_id: row.cart_id,
            user_id: row.user_id,
            fullname_user: row.fullname_user,
            trx_date: row.trx_date,
            payment: row.payment,
            payment_url: row.payment_url,
            amount: row.amount,
            status: TransactionStatus::parse(&row.status),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TransactionDao for PgTransactionDaoImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Transaction>> {
        debug!("Finding all transactions");

        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY trx_date DESC");
        let rows = sqlx::query_as::<_, TransactionRow>(&sql)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn find_by_id(&self, id: TransactionId) -> DepublicResult<Option<Transaction>> {
        debug!("Finding transaction by id: {}", id);

        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE transaction_id = $1");
        let row = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Transaction::from))
    }

    async fn find_by_user(&self, user_id: UserId) -> DepublicResult<Vec<Transaction>> {
        debug!("Finding transactions for user: {}", user_id);

        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE user_id = $1 \
             ORDER BY trx_date DESC"
        );
        let rows = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn create(&self, transaction: &Transaction) -> DepublicResult<Transaction> {
        debug!("Creating transaction for cart: {}", transaction.cart_id);

        let sql = format!(
            "INSERT INTO transactions ({TRANSACTION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {TRANSACTION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(transaction.transaction_id)
            .bind(transaction.cart_id)
            .bind(transaction.user_id)
            .bind(&transaction.fullname_user)
            .bind(transaction.trx_date)
            .bind(&transaction.payment)
            .bind(&transaction.payment_url)
            .bind(transaction.amount)
            .bind(transaction.status.as_str())
            .bind(transaction.created_at)
            .bind(transaction.updated_at)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(row.into())
    }

    async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
        payment_url: Option<&str>,
    ) -> DepublicResult<Transaction> {
        debug!("Updating transaction {} to status {}", id, status);

        let sql = format!(
            "UPDATE transactions SET status = $2, payment_url = COALESCE($3, payment_url), \
             updated_at = NOW() WHERE transaction_id = $1 RETURNING {TRANSACTION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(id)
            .bind(status.as_str())
            .bind(payment_url)
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Transaction::from)
            .ok_or_else(|| DepublicError::not_found("Transaction", id))
    }

    async fn update(&self, transaction: &Transaction) -> DepublicResult<Transaction> {
        let id = transaction.transaction_id;
        debug!("Updating transaction: {}", id);

        let sql = format!(
            "UPDATE transactions SET fullname_user = $2, payment = $3, payment_url = $4, \
             amount = $5, status = $6, updated_at = NOW() \
             WHERE transaction_id = $1 RETURNING {TRANSACTION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(id)
            .bind(&transaction.fullname_user)
            .bind(&transaction.payment)
            .bind(&transaction.payment_url)
            .bind(transaction.amount)
            .bind(transaction.status.as_str())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Transaction::from)
            .ok_or_else(|| DepublicError::not_found("Transaction", id))
    }

    async fn delete(&self, id: TransactionId) -> DepublicResult<Option<Vec<TicketId>>> {
        debug!("Deleting transaction: {}", id);

        // tickets would cascade anyway; deleting them first yields their ids
        let mut tx = self.pool.inner().begin().await?;

        let ticket_ids: Vec<TicketId> =
            sqlx::query_scalar("DELETE FROM tickets WHERE transaction_id = $1 RETURNING ticket_id")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM transactions WHERE transaction_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(ticket_ids))
    }
}

impl std::fmt::Debug for PgTransactionDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTransactionDaoImpl").finish_non_exhaustive()
    }
}
