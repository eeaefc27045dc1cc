//! DAO (Data Access Object) layer.
//!
//! DAOs provide low-level, single-source data access abstractions.
//! Each DAO talks to the relational store only; caching lives one layer up
//! in the repository implementations.
//!
//! Hierarchy:
//! ```text
//! Service → Repository (interface + cached impl) → DAO (interface + impl) → DB
//! ```

pub mod cart_dao;
pub mod category_dao;
pub mod r#impl;
pub mod notification_dao;
pub mod ticket_dao;
pub mod transaction_dao;
pub mod user_dao;
pub mod wishlist_dao;

pub use cart_dao::CartDao;
pub use category_dao::CategoryDao;
pub use notification_dao::NotificationDao;
pub use ticket_dao::TicketDao;
pub use transaction_dao::TransactionDao;
pub use user_dao::UserDao;
pub use wishlist_dao::WishlistDao;

pub use r#impl::{
    PgCartDaoImpl, PgCategoryDaoImpl, PgNotificationDaoImpl, PgTicketDaoImpl,
    PgTransactionDaoImpl, PgUserDaoImpl, PgWishlistDaoImpl,
};
