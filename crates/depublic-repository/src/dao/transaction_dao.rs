//! TransactionDao trait.

use async_trait::async_trait;
use depublic_core::{
    DepublicResult, TicketId, Transaction, TransactionId, TransactionStatus, UserId,
};

/// Low-level transaction data access object.
#[async_trait]
pub trait TransactionDao: Send + Sync {
    /// Lists every transaction, newest first.
    async fn find_all(&self) -> DepublicResult<Vec<Transaction>>;

    /// Finds a transaction by ID.
    async fn find_by_id(&self, id: TransactionId) -> DepublicResult<Option<Transaction>>;

    /// Lists one user's transactions, newest first.
    async fn find_by_user(&self, user_id: UserId) -> DepublicResult<Vec<Transaction>>;

    /// Persists a new transaction.
    async fn create(&self, transaction: &Transaction) -> DepublicResult<Transaction>;

    /// Sets the payment status and, when given, the gateway URL.
    ///
    /// Fails with `NotFound` if the transaction is gone.
    async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
        payment_url: Option<&str>,
    ) -> DepublicResult<Transaction>;

    /// Overwrites the mutable fields of a transaction.
    ///
    /// Fails with `NotFound` if the transaction is gone.
    async fn update(&self, transaction: &Transaction) -> DepublicResult<Transaction>;

    /// Deletes a transaction together with its tickets.
    ///
    /// Returns the ids of the removed tickets, or `None` if no transaction
    /// had that id.
    async fn delete(&self, id: TransactionId) -> DepublicResult<Option<Vec<TicketId>>>;
}
