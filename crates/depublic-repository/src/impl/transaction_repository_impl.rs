//! `TransactionRepositoryImpl`: cached transaction repository.

use crate::cache::{cache_keys, CacheStore, ReadThroughCache};
use crate::{dao::TransactionDao, traits::TransactionRepository};
use async_trait::async_trait;
use depublic_core::{DepublicResult, Transaction, TransactionId, TransactionStatus, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Repository implementation that caches [`TransactionDao`] reads.
///
/// A user's own history is read straight from the database so a payment
/// callback is reflected on the next page load.
pub struct TransactionRepositoryImpl {
    transaction_dao: Arc<dyn TransactionDao>,
    cache: ReadThroughCache,
}

impl TransactionRepositoryImpl {
    #[must_use]
    pub fn new(
        transaction_dao: Arc<dyn TransactionDao>,
        store: Arc<dyn CacheStore>,
        ttl: Duration,
    ) -> Self {
        Self {
            transaction_dao,
            cache: ReadThroughCache::new(store, ttl, "transaction"),
        }
    }

    async fn invalidate(&self, id: TransactionId) {
        let key = cache_keys::transaction_by_id(id);
        self.cache
            .invalidate(&[cache_keys::ALL_TRANSACTIONS, &key])
            .await;
    }
}

#[async_trait]
impl TransactionRepository for TransactionRepositoryImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Transaction>> {
        debug!("Repository: find_all transactions");
        self.cache
            .fetch(cache_keys::ALL_TRANSACTIONS, || self.transaction_dao.find_all())
            .await
    }

    async fn find_by_id(&self, id: TransactionId) -> DepublicResult<Option<Transaction>> {
        debug!("Repository: find_by_id transaction {}", id);
        let key = cache_keys::transaction_by_id(id);
        self.cache
            .fetch_optional(&key, || self.transaction_dao.find_by_id(id))
            .await
    }

    async fn find_by_user(&self, user_id: UserId) -> DepublicResult<Vec<Transaction>> {
        self.transaction_dao.find_by_user(user_id).await
    }

    async fn create(&self, transaction: &Transaction) -> DepublicResult<Transaction> {
        debug!("Repository: create transaction {}", transaction.transaction_id);
        let created = self.transaction_dao.create(transaction).await?;
        self.cache.invalidate(&[cache_keys::ALL_TRANSACTIONS]).await;
        Ok(created)
    }

    async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
        payment_url: Option<&str>,
    ) -> DepublicResult<Transaction> {
        debug!("Repository: transaction {} -> {}", id, status);
        let updated = self
            .transaction_dao
            .update_status(id, status, payment_url)
            .await?;
        self.invalidate(id).await;
        Ok(updated)
    }

    async fn update(&self, transaction: &Transaction) -> DepublicResult<Transaction> {
        debug!("Repository: update transaction {}", transaction.transaction_id);
        let updated = self.transaction_dao.update(transaction).await?;
        self.invalidate(updated.transaction_id).await;
        Ok(updated)
    }

    async fn delete(&self, id: TransactionId) -> DepublicResult<bool> {
        debug!("Repository: delete transaction {}", id);
        let Some(ticket_ids) = self.transaction_dao.delete(id).await? else {
            self.invalidate(id).await;
            return Ok(false);
        };

        let mut keys: Vec<String> = vec![
            cache_keys::ALL_TRANSACTIONS.to_string(),
            cache_keys::transaction_by_id(id),
            cache_keys::ALL_TICKETS.to_string(),
        ];
        keys.extend(ticket_ids.into_iter().map(cache_keys::ticket_by_id));
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        self.cache.invalidate(&keys).await;
        Ok(true)
    }
}

impl std::fmt::Debug for TransactionRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionRepositoryImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
