//! Notification entity.

use crate::{NotificationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    General,
    Account,
    Wishlist,
    Cart,
    Transaction,
}

impl NotificationKind {
    /// Returns the lowercase name stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Account => "account",
            Self::Wishlist => "wishlist",
            Self::Cart => "cart",
            Self::Transaction => "transaction",
        }
    }

    /// Parses a stored kind, falling back to `General` for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "account" => Self::Account,
            "wishlist" => Self::Wishlist,
            "cart" => Self::Cart,
            "transaction" => Self::Transaction,
            _ => Self::General,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message shown to one user, or to everyone when `user_id` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: NotificationId,
    pub user_id: Option<UserId>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification addressed to a single user.
    #[must_use]
    pub fn for_user(user_id: UserId, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            notification_id: NotificationId::new(),
            user_id: Some(user_id),
            kind,
            message: message.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Creates an unread notification visible to every user.
    #[must_use]
    pub fn broadcast(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            notification_id: NotificationId::new(),
            user_id: None,
            kind,
            message: message.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Whether `user_id` should see this notification.
    #[must_use]
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.user_id.map_or(true, |owner| owner == user_id)
    }
}
