//! Repository implementations.
//!
//! Each implementation coordinates one DAO with the shared read-through
//! cache. They only decide which keys a read goes through and which keys a
//! write invalidates; the caching behaviour itself lives in
//! [`ReadThroughCache`](crate::cache::ReadThroughCache).

mod cart_repository_impl;
mod category_repository_impl;
mod notification_repository_impl;
mod ticket_repository_impl;
mod transaction_repository_impl;
mod user_repository_impl;
mod wishlist_repository_impl;

pub use cart_repository_impl::CartRepositoryImpl;
pub use category_repository_impl::CategoryRepositoryImpl;
pub use notification_repository_impl::NotificationRepositoryImpl;
pub use ticket_repository_impl::TicketRepositoryImpl;
pub use transaction_repository_impl::TransactionRepositoryImpl;
pub use user_repository_impl::UserRepositoryImpl;
pub use wishlist_repository_impl::WishlistRepositoryImpl;
