//! PostgreSQL ticket DAO.

use crate::{dao::TicketDao, pool::DatabasePool};
use async_trait::async_trait;
use depublic_core::{DepublicError, DepublicResult, Ticket, TicketId, TransactionId};
use std::sync::Arc;
use tracing::debug;

const TICKET_COLUMNS: &str = "ticket_id, transaction_id, event_id, code_qr, name_event, \
                              ticket_date, quantity, created_at, updated_at";

/// PostgreSQL implementation of [`TicketDao`].
#[derive(Clone)]
pub struct PgTicketDaoImpl {
    pool: Arc<DatabasePool>,
}

impl PgTicketDaoImpl {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketDao for PgTicketDaoImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Ticket>> {
        debug!("Finding all tickets");

        let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets ORDER BY created_at");
        let rows = sqlx::query_as::<_, Ticket>(&sql)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: TicketId) -> DepublicResult<Option<Ticket>> {
        debug!("Finding ticket by id: {}", id);

        let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE ticket_id = $1");
        let row = sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row)
    }

    async fn find_by_transaction(&self, transaction_id: TransactionId) -> DepublicResult<Vec<Ticket>> {
        debug!("Finding tickets for transaction: {}", transaction_id);

        let sql = format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE transaction_id = $1 ORDER BY created_at"
        );
        let rows = sqlx::query_as::<_, Ticket>(&sql)
            .bind(transaction_id)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows)
    }

    async fn create(&self, ticket: &Ticket) -> DepublicResult<Ticket> {
        debug!("Creating ticket {} for transaction {}", ticket.code_qr, ticket.transaction_id);

        let sql = format!(
            "INSERT INTO tickets ({TICKET_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {TICKET_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Ticket>(&sql)
            .bind(ticket.ticket_id)
            .bind(ticket.transaction_id)
            .bind(ticket.event_id)
            .bind(&ticket.code_qr)
            .bind(&ticket.name_event)
            .bind(ticket.ticket_date)
            .bind(ticket.quantity)
            .bind(ticket.created_at)
            .bind(ticket.updated_at)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(row)
    }

    async fn update(&self, ticket: &Ticket) -> DepublicResult<Ticket> {
        debug!("Updating ticket: {}", ticket.ticket_id);

        let sql = format!(
            "UPDATE tickets SET name_event = $2, ticket_date = $3, quantity = $4, \
             updated_at = NOW() WHERE ticket_id = $1 RETURNING {TICKET_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Ticket>(&sql)
            .bind(ticket.ticket_id)
            .bind(&ticket.name_event)
            .bind(ticket.ticket_date)
            .bind(ticket.quantity)
            .fetch_optional(self.pool.inner())
            .await?;

        row.ok_or_else(|| DepublicError::not_found("Ticket", ticket.ticket_id))
    }

    async fn delete(&self, id: TicketId) -> DepublicResult<bool> {
        debug!("Deleting ticket: {}", id);

        let result = sqlx::query("DELETE FROM tickets WHERE ticket_id = $1")
            .bind(id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for PgTicketDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTicketDaoImpl").finish_non_exhaustive()
    }
}
