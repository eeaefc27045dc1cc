//! `UserRepositoryImpl`: cached user repository.
//!
//! ```text
//! Service
//!   ↓ Arc<dyn UserRepository>
//! UserRepositoryImpl          ← read-through on GetAllUsers / GetUserByID:{id}
//!   ↓ Arc<dyn UserDao>
//! PgUserDaoImpl
//! ```
//!
//! Lookups by email serve the login and registration paths and always hit the
//! database, as do credentials; a password hash never enters the cache.

use crate::cache::{cache_keys, CacheStore, ReadThroughCache};
use crate::{dao::UserDao, traits::UserRepository};
use async_trait::async_trait;
use depublic_core::{DepublicResult, User, UserCredentials, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Repository implementation that caches [`UserDao`] reads.
pub struct UserRepositoryImpl {
    user_dao: Arc<dyn UserDao>,
    cache: ReadThroughCache,
}

impl UserRepositoryImpl {
    /// Creates a new `UserRepositoryImpl` over a DAO and the shared cache store.
    #[must_use]
    pub fn new(user_dao: Arc<dyn UserDao>, store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            user_dao,
            cache: ReadThroughCache::new(store, ttl, "user"),
        }
    }

    async fn invalidate(&self, id: UserId) {
        let key = cache_keys::user_by_id(id);
        self.cache.invalidate(&[cache_keys::ALL_USERS, &key]).await;
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_all(&self) -> DepublicResult<Vec<User>> {
        debug!("Repository: find_all users");
        self.cache
            .fetch(cache_keys::ALL_USERS, || self.user_dao.find_all())
            .await
    }

    async fn find_by_id(&self, id: UserId) -> DepublicResult<Option<User>> {
        debug!("Repository: find_by_id user {}", id);
        let key = cache_keys::user_by_id(id);
        self.cache
            .fetch_optional(&key, || self.user_dao.find_by_id(id))
            .await
    }

    async fn find_by_email(&self, email: &str) -> DepublicResult<Option<User>> {
        debug!("Repository: find_by_email {}", email);
        self.user_dao.find_by_email(email).await
    }

    async fn find_credentials(&self, email: &str) -> DepublicResult<Option<UserCredentials>> {
        self.user_dao.find_credentials(email).await
    }

    async fn email_exists(&self, email: &str) -> DepublicResult<bool> {
        self.user_dao.email_exists(email).await
    }

    async fn create(&self, user: &User, password_hash: &str) -> DepublicResult<User> {
        debug!("Repository: create user {}", user.email);
        let created = self.user_dao.create(user, password_hash).await?;
        self.cache.invalidate(&[cache_keys::ALL_USERS]).await;
        Ok(created)
    }

    async fn update(&self, user: &User) -> DepublicResult<User> {
        debug!("Repository: update user {}", user.user_id);
        let updated = self.user_dao.update(user).await?;
        self.invalidate(updated.user_id).await;
        Ok(updated)
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> DepublicResult<()> {
        debug!("Repository: update password for user {}", id);
        self.user_dao.update_password(id, password_hash).await?;
        // `updated_at` moved.
        self.invalidate(id).await;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> DepublicResult<bool> {
        debug!("Repository: delete user {}", id);
        let deleted = self.user_dao.delete(id).await?;
        // wishlists, carts and notifications rows go with the user (ON DELETE CASCADE)
        let detail = cache_keys::user_by_id(id);
        let user_carts = cache_keys::carts_by_user(id);
        self.cache
            .invalidate(&[
                cache_keys::ALL_USERS,
                &detail,
                cache_keys::ALL_WISHLISTS,
                cache_keys::ALL_CARTS,
                &user_carts,
                cache_keys::ALL_NOTIFICATIONS,
            ])
            .await;
        Ok(deleted)
    }
}

impl std::fmt::Debug for UserRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepositoryImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
