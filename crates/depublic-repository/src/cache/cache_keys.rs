//! Cache key generators for consistent key naming.
//!
//! Each entity owns one collection key for its "all rows" query. Entities
//! that opt into detail caching also get one key per identifier. Every key
//! an entity reads through must be invalidated by that entity's writes.

use depublic_core::{CategoryId, TicketId, TransactionId, UserId};

/// Every user.
pub const ALL_USERS: &str = "GetAllUsers";
/// Every category.
pub const ALL_CATEGORIES: &str = "GetAllCategories";
/// Every wishlist row.
pub const ALL_WISHLISTS: &str = "GetAllWishlists";
/// Every cart line.
pub const ALL_CARTS: &str = "GetAllCarts";
/// Every transaction.
pub const ALL_TRANSACTIONS: &str = "GetAllTransactions";
/// Every ticket.
pub const ALL_TICKETS: &str = "GetAllTickets";
/// Every notification.
pub const ALL_NOTIFICATIONS: &str = "GetAllNotifications";

/// Generate a cache key for a user by ID.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("GetUserByID:{}", id)
}

/// Generate a cache key for a category by ID.
#[must_use]
pub fn category_by_id(id: CategoryId) -> String {
    format!("GetCategoryByID:{}", id)
}

/// Generate a cache key for one user's cart lines.
#[must_use]
pub fn carts_by_user(user_id: UserId) -> String {
    format!("GetCartsByUser:{}", user_id)
}

/// Generate a cache key for a transaction by ID.
#[must_use]
pub fn transaction_by_id(id: TransactionId) -> String {
    format!("GetTransactionByID:{}", id)
}

/// Generate a cache key for a ticket by ID.
#[must_use]
pub fn ticket_by_id(id: TicketId) -> String {
    format!("GetTicketByID:{}", id)
}
