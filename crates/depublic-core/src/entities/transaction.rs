//! Payment transaction entity.

use crate::{CartId, TransactionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Unpaid,
    Paid,
    Cancelled,
}

impl TransactionStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a stored status, falling back to `Unpaid` for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "paid" | "settlement" => Self::Paid,
            "cancelled" | "cancel" | "expire" => Self::Cancelled,
            _ => Self::Unpaid,
        }
    }

    /// Paid and cancelled transactions never change again.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout of a cart line through the payment gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub cart_id: CartId,
    pub user_id: UserId,
    pub fullname_user: String,
    pub trx_date: DateTime<Utc>,
    /// Payment channel chosen by the user.
    pub payment: String,
    /// Gateway redirect URL, set once the gateway accepted the charge.
    pub payment_url: Option<String>,
    pub amount: i64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    #[must_use]
    pub fn new(
        cart_id: CartId,
        user_id: UserId,
        fullname_user: impl Into<String>,
        payment: impl Into<String>,
        amount: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            transaction_id: TransactionId::new(),
            cart_id,
            user_id,
            fullname_user: fullname_user.into(),
            trx_date: now,
            payment: payment.into(),
            payment_url: None,
            amount,
            status: TransactionStatus::Unpaid,
            created_at: now,
            updated_at: now,
        }
    }
}
