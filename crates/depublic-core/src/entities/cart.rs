//! Cart entity.

use crate::{CartId, EventId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A cart line: `qty` tickets for one event on one date.
///
/// `price` is the total for the line in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Cart {
    pub cart_id: CartId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub qty: i32,
    pub ticket_date: NaiveDate,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a cart line priced at `unit_price * qty`.
    #[must_use]
    pub fn new(
        user_id: UserId,
        event_id: EventId,
        qty: i32,
        ticket_date: NaiveDate,
        unit_price: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            cart_id: CartId::new(),
            user_id,
            event_id,
            qty,
            ticket_date,
            price: unit_price * i64::from(qty),
            created_at: now,
            updated_at: now,
        }
    }

    /// Changes the quantity, keeping the unit price.
    pub fn set_quantity(&mut self, qty: i32) {
        if self.qty > 0 {
            let unit_price = self.price / i64::from(self.qty);
            self.price = unit_price * i64::from(qty);
        }
        self.qty = qty;
        self.updated_at = Utc::now();
    }
}
