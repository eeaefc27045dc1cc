//! Entities persisted in the relational store and mirrored in the cache.
//!
//! Every entity round-trips through `serde_json` unchanged; cached
//! snapshots decode into exactly what a fresh query returns.

mod cart;
mod category;
mod notification;
mod ticket;
mod transaction;
mod user;
mod wishlist;

pub use cart::Cart;
pub use category::Category;
pub use notification::{Notification, NotificationKind};
pub use ticket::Ticket;
pub use transaction::{Transaction, TransactionStatus};
pub use user::{User, UserCredentials, UserRole};
pub use wishlist::Wishlist;
