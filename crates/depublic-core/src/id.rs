//! Typed ID wrappers for domain entities.
//!
//! Every entity is keyed by a UUID. The wrappers keep a `CategoryId` from
//! being passed where a `TicketId` is expected, and serialize transparently so
//! cached payloads and database rows carry plain UUID strings.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new time-ordered random ID.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parses an ID from its hyphenated string form.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user or admin account.
    UserId
);
entity_id!(
    /// Identifier of an event category.
    CategoryId
);
entity_id!(
    /// Identifier of a ticketed event.
    EventId
);
entity_id!(
    /// Identifier of a wishlist row.
    WishlistId
);
entity_id!(
    /// Identifier of a cart line.
    CartId
);
entity_id!(
    /// Identifier of a payment transaction.
    TransactionId
);
entity_id!(
    /// Identifier of an issued ticket.
    TicketId
);
entity_id!(
    /// Identifier of a notification.
    NotificationId
);
