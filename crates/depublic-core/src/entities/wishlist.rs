//! Wishlist entity.

use crate::{EventId, UserId, WishlistId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event a user has bookmarked. At most one row per (event, user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Wishlist {
    pub wishlist_id: WishlistId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub created_at: DateTime<Utc>,
}

impl Wishlist {
    #[must_use]
    pub fn new(user_id: UserId, event_id: EventId) -> Self {
        Self {
            wishlist_id: WishlistId::new(),
            user_id,
            event_id,
            created_at: Utc::now(),
        }
    }
}
