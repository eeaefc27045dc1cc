//! UserDao trait: low-level user data access abstraction.
//!
//! Implementations connect directly to a single data source.
//! [`UserRepository`] wraps a `UserDao` with the read-through cache.
//!
//! [`UserRepository`]: crate::traits::UserRepository

use async_trait::async_trait;
use depublic_core::{DepublicResult, User, UserCredentials, UserId};

/// Low-level user data access object.
#[async_trait]
pub trait UserDao: Send + Sync {
    /// Lists every user.
    async fn find_all(&self) -> DepublicResult<Vec<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> DepublicResult<Option<User>>;

    /// Finds a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> DepublicResult<Option<User>>;

    /// Loads the login material for an email.
    async fn find_credentials(&self, email: &str) -> DepublicResult<Option<UserCredentials>>;

    /// Checks if an email is already registered.
    async fn email_exists(&self, email: &str) -> DepublicResult<bool>;

    /// Persists a new user with its password hash.
    async fn create(&self, user: &User, password_hash: &str) -> DepublicResult<User>;

    /// Updates profile fields. Fails with `NotFound` if the user is gone.
    async fn update(&self, user: &User) -> DepublicResult<User>;

    /// Replaces the password hash. Fails with `NotFound` if the user is gone.
    async fn update_password(&self, id: UserId, password_hash: &str) -> DepublicResult<()>;

    /// Deletes a user by ID. Returns `true` if deleted.
    async fn delete(&self, id: UserId) -> DepublicResult<bool>;
}
