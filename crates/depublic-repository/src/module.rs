//! Repository wiring.
//!
//! Builds the connection pool, the single shared cache store and every
//! repository, handing the same `Arc<dyn CacheStore>` to each constructor.

use crate::cache::{metrics, CacheStore, InMemoryCacheStore, RedisCacheStore};
use crate::dao::{
    CartDao, CategoryDao, NotificationDao, PgCartDaoImpl, PgCategoryDaoImpl,
    PgNotificationDaoImpl, PgTicketDaoImpl, PgTransactionDaoImpl, PgUserDaoImpl,
    PgWishlistDaoImpl, TicketDao, TransactionDao, UserDao, WishlistDao,
};
use crate::pool::{create_pool, DatabasePool};
use crate::r#impl::{
    CartRepositoryImpl, CategoryRepositoryImpl, NotificationRepositoryImpl, TicketRepositoryImpl,
    TransactionRepositoryImpl, UserRepositoryImpl, WishlistRepositoryImpl,
};
use crate::traits::{
    CartRepository, CategoryRepository, NotificationRepository, TicketRepository,
    TransactionRepository, UserRepository, WishlistRepository,
};
use depublic_config::{AppConfig, CacheBackend, CacheConfig, RedisConfig};
use depublic_core::DepublicResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// One DAO per entity.
#[derive(Clone)]
pub struct DaoSet {
    pub users: Arc<dyn UserDao>,
    pub categories: Arc<dyn CategoryDao>,
    pub wishlists: Arc<dyn WishlistDao>,
    pub carts: Arc<dyn CartDao>,
    pub transactions: Arc<dyn TransactionDao>,
    pub tickets: Arc<dyn TicketDao>,
    pub notifications: Arc<dyn NotificationDao>,
}

impl DaoSet {
    /// PostgreSQL DAOs sharing one pool.
    #[must_use]
    pub fn postgres(pool: &Arc<DatabasePool>) -> Self {
        Self {
            users: Arc::new(PgUserDaoImpl::new(pool.clone())),
            categories: Arc::new(PgCategoryDaoImpl::new(pool.clone())),
            wishlists: Arc::new(PgWishlistDaoImpl::new(pool.clone())),
            carts: Arc::new(PgCartDaoImpl::new(pool.clone())),
            transactions: Arc::new(PgTransactionDaoImpl::new(pool.clone())),
            tickets: Arc::new(PgTicketDaoImpl::new(pool.clone())),
            notifications: Arc::new(PgNotificationDaoImpl::new(pool.clone())),
        }
    }
}

/// Builds the cache store selected by `cache.backend`.
pub fn build_cache_store(
    cache: &CacheConfig,
    redis: &RedisConfig,
) -> DepublicResult<Arc<dyn CacheStore>> {
    let store: Arc<dyn CacheStore> = match cache.backend {
        CacheBackend::Redis => Arc::new(RedisCacheStore::from_config(
            redis,
            cache.operation_timeout(),
        )?),
        CacheBackend::Memory => Arc::new(InMemoryCacheStore::new()),
        CacheBackend::Disabled => Arc::new(RedisCacheStore::disabled()),
    };
    info!(backend = %cache.backend, ttl_secs = cache.ttl_secs, "Cache store ready");
    Ok(store)
}

/// Every repository of the application over one pool and one cache store.
pub struct RepositoryModule {
    pool: Option<Arc<DatabasePool>>,
    cache_store: Arc<dyn CacheStore>,
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    wishlists: Arc<dyn WishlistRepository>,
    carts: Arc<dyn CartRepository>,
    transactions: Arc<dyn TransactionRepository>,
    tickets: Arc<dyn TicketRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl RepositoryModule {
    /// Connects to PostgreSQL, runs migrations if configured, and builds the
    /// cache store and repositories.
    pub async fn connect(config: &AppConfig) -> DepublicResult<Self> {
        metrics::register_metrics();

        let pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }

        let store = build_cache_store(&config.cache, &config.redis)?;
        let daos = DaoSet::postgres(&pool);

        let mut module = Self::from_parts(daos, store, config.cache.ttl());
        module.pool = Some(pool);
        info!("Repository module initialized");
        Ok(module)
    }

    /// Builds the repositories over caller-supplied DAOs and store.
    #[must_use]
    pub fn from_parts(daos: DaoSet, cache_store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            pool: None,
            users: Arc::new(UserRepositoryImpl::new(daos.users, cache_store.clone(), ttl)),
            categories: Arc::new(CategoryRepositoryImpl::new(
                daos.categories,
                cache_store.clone(),
                ttl,
            )),
            wishlists: Arc::new(WishlistRepositoryImpl::new(
                daos.wishlists,
                cache_store.clone(),
                ttl,
            )),
            carts: Arc::new(CartRepositoryImpl::new(daos.carts, cache_store.clone(), ttl)),
            transactions: Arc::new(TransactionRepositoryImpl::new(
                daos.transactions,
                cache_store.clone(),
                ttl,
            )),
            tickets: Arc::new(TicketRepositoryImpl::new(daos.tickets, cache_store.clone(), ttl)),
            notifications: Arc::new(NotificationRepositoryImpl::new(
                daos.notifications,
                cache_store.clone(),
                ttl,
            )),
            cache_store,
        }
    }

    #[must_use]
    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    #[must_use]
    pub fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.categories.clone()
    }

    #[must_use]
    pub fn wishlists(&self) -> Arc<dyn WishlistRepository> {
        self.wishlists.clone()
    }

    #[must_use]
    pub fn carts(&self) -> Arc<dyn CartRepository> {
        self.carts.clone()
    }

    #[must_use]
    pub fn transactions(&self) -> Arc<dyn TransactionRepository> {
        self.transactions.clone()
    }

    #[must_use]
    pub fn tickets(&self) -> Arc<dyn TicketRepository> {
        self.tickets.clone()
    }

    #[must_use]
    pub fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notifications.clone()
    }

    /// The store shared by every repository.
    #[must_use]
    pub fn cache_store(&self) -> Arc<dyn CacheStore> {
        self.cache_store.clone()
    }

    /// The database pool, when built by [`connect`](Self::connect).
    #[must_use]
    pub fn pool(&self) -> Option<Arc<DatabasePool>> {
        self.pool.clone()
    }

    /// Checks the database and the cache store.
    pub async fn health_check(&self) -> DepublicResult<()> {
        if let Some(pool) = &self.pool {
            pool.health_check().await?;
        }
        self.cache_store.ping().await?;
        Ok(())
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

impl std::fmt::Debug for RepositoryModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryModule")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
