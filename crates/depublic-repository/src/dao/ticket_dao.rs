//! TicketDao trait.

use async_trait::async_trait;
use depublic_core::{DepublicResult, Ticket, TicketId, TransactionId};

/// Low-level ticket data access object.
#[async_trait]
pub trait TicketDao: Send + Sync {
    /// Lists every ticket.
    async fn find_all(&self) -> DepublicResult<Vec<Ticket>>;

    /// Finds a ticket by ID.
    async fn find_by_id(&self, id: TicketId) -> DepublicResult<Option<Ticket>>;

    /// Lists the tickets issued for one transaction.
    async fn find_by_transaction(&self, transaction_id: TransactionId) -> DepublicResult<Vec<Ticket>>;

    /// Persists a new ticket.
    async fn create(&self, ticket: &Ticket) -> DepublicResult<Ticket>;

    /// Updates event name, date and quantity. Fails with `NotFound` if the ticket is gone.
    async fn update(&self, ticket: &Ticket) -> DepublicResult<Ticket>;

    /// Deletes a ticket by ID. Returns `true` if deleted.
    async fn delete(&self, id: TicketId) -> DepublicResult<bool>;
}
