//! # Depublic Repository
//!
//! Read-through / invalidate-on-write caching over PostgreSQL:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn CategoryRepository>  (domain interface)
//! CategoryRepositoryImpl            (repository impl: keys + invalidation)
//!   ↓  ReadThroughCache ──────────→ Arc<dyn CacheStore> (Redis / in-memory)
//!   ↓  Arc<dyn CategoryDao>         (DAO interface)
//! PgCategoryDaoImpl                 (DAO impl: PostgreSQL / SQLx)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                        ← repository traits
//!   module.rs                        ← RepositoryModule wiring
//!   pool.rs                          ← DatabasePool
//!   cache/
//!     read_through.rs                ← ReadThroughCache
//!     redis_cache.rs / memory_cache.rs
//!   impl/
//!     category_repository_impl.rs    ← CategoryRepositoryImpl, …
//!   dao/
//!     category_dao.rs                ← CategoryDao trait, …
//!     impl/postgres/
//!       category_dao_impl.rs         ← PgCategoryDaoImpl, …
//! ```
//!
//! Database errors always reach the caller. Cache errors never do.

pub mod cache;
pub mod dao;
pub mod module;
pub mod pool;
pub mod traits;
pub mod r#impl;

#[cfg(test)]
mod test_support;

pub use cache::{CacheError, CacheStore, InMemoryCacheStore, ReadThroughCache, RedisCacheStore};
pub use dao::{
    CartDao, CategoryDao, NotificationDao, TicketDao, TransactionDao, UserDao, WishlistDao,
};
pub use module::{build_cache_store, DaoSet, RepositoryModule};
pub use pool::*;
pub use r#impl::{
    CartRepositoryImpl, CategoryRepositoryImpl, NotificationRepositoryImpl, TicketRepositoryImpl,
    TransactionRepositoryImpl, UserRepositoryImpl, WishlistRepositoryImpl,
};
pub use traits::*;

// Re-export DAO implementations for convenience
pub use dao::{
    PgCartDaoImpl, PgCategoryDaoImpl, PgNotificationDaoImpl, PgTicketDaoImpl,
    PgTransactionDaoImpl, PgUserDaoImpl, PgWishlistDaoImpl,
};
