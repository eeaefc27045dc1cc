//! Ticket entity.

use crate::{EventId, TicketId, TransactionId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A ticket issued for a paid transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ticket {
    pub ticket_id: TicketId,
    pub transaction_id: TransactionId,
    pub event_id: EventId,
    /// Payload encoded into the entry QR code.
    pub code_qr: String,
    pub name_event: String,
    pub ticket_date: NaiveDate,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    #[must_use]
    pub fn new(
        transaction_id: TransactionId,
        event_id: EventId,
        name_event: impl Into<String>,
        ticket_date: NaiveDate,
        quantity: i32,
    ) -> Self {
        let now = Utc::now();
        let ticket_id = TicketId::new();
        Self {
            ticket_id,
            transaction_id,
            event_id,
            code_qr: format!("DEPUBLIC-{}", ticket_id.into_inner().simple()),
            name_event: name_event.into(),
            ticket_date,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }
}
