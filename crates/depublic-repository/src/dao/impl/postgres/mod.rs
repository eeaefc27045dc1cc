//! PostgreSQL DAO implementations over a shared [`DatabasePool`].
//!
//! [`DatabasePool`]: crate::pool::DatabasePool

mod cart_dao_impl;
mod category_dao_impl;
mod notification_dao_impl;
mod ticket_dao_impl;
mod transaction_dao_impl;
mod user_dao_impl;
mod wishlist_dao_impl;

pub use cart_dao_impl::PgCartDaoImpl;
pub use category_dao_impl::PgCategoryDaoImpl;
pub use notification_dao_impl::PgNotificationDaoImpl;
pub use ticket_dao_impl::PgTicketDaoImpl;
pub use transaction_dao_impl::PgTransactionDaoImpl;
pub use user_dao_impl::PgUserDaoImpl;
pub use wishlist_dao_impl::PgWishlistDaoImpl;
