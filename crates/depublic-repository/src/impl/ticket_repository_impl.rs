//! `TicketRepositoryImpl`: cached ticket repository.

use crate::cache::{cache_keys, CacheStore, ReadThroughCache};
use crate::{dao::TicketDao, traits::TicketRepository};
use async_trait::async_trait;
use depublic_core::{DepublicResult, Ticket, TicketId, TransactionId};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Repository implementation that caches [`TicketDao`] reads.
pub struct TicketRepositoryImpl {
    ticket_dao: Arc<dyn TicketDao>,
    cache: ReadThroughCache,
}

impl TicketRepositoryImpl {
    #[must_use]
    pub fn new(ticket_dao: Arc<dyn TicketDao>, store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            ticket_dao,
            cache: ReadThroughCache::new(store, ttl, "ticket"),
        }
    }

    async fn invalidate(&self, id: TicketId) {
        let key = cache_keys::ticket_by_id(id);
        self.cache.invalidate(&[cache_keys::ALL_TICKETS, &key]).await;
    }
}

#[async_trait]
impl TicketRepository for TicketRepositoryImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Ticket>> {
        debug!("Repository: find_all tickets");
        self.cache
            .fetch(cache_keys::ALL_TICKETS, || self.ticket_dao.find_all())
            .await
    }

    async fn find_by_id(&self, id: TicketId) -> DepublicResult<Option<Ticket>> {
        debug!("Repository: find_by_id ticket {}", id);
        let key = cache_keys::ticket_by_id(id);
        self.cache
            .fetch_optional(&key, || self.ticket_dao.find_by_id(id))
            .await
    }

    async fn find_by_transaction(&self, transaction_id: TransactionId) -> DepublicResult<Vec<Ticket>> {
        self.ticket_dao.find_by_transaction(transaction_id).await
    }

    async fn create(&self, ticket: &Ticket) -> DepublicResult<Ticket> {
        debug!("Repository: create ticket {}", ticket.code_qr);
        let created = self.ticket_dao.create(ticket).await?;
        self.cache.invalidate(&[cache_keys::ALL_TICKETS]).await;
        Ok(created)
    }

    async fn update(&self, ticket: &Ticket) -> DepublicResult<Ticket> {
        debug!("Repository: update ticket {}", ticket.ticket_id);
        let updated = self.ticket_dao.update(ticket).await?;
        self.invalidate(updated.ticket_id).await;
        Ok(updated)
    }

    async fn delete(&self, id: TicketId) -> DepublicResult<bool> {
        debug!("Repository: delete ticket {}", id);
        let deleted = self.ticket_dao.delete(id).await?;
        self.invalidate(id).await;
        Ok(deleted)
    }
}

impl std::fmt::Debug for TicketRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketRepositoryImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
