//! PostgreSQL user DAO.

use crate::{dao::UserDao, pool::DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use depublic_core::{DepublicError, DepublicResult, User, UserCredentials, UserId, UserRole};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const USER_COLUMNS: &str = "user_id, fullname, email, phone, role, address, verified, status, \
                            created_at, updated_at";

/// PostgreSQL implementation of [`UserDao`].
#[derive(Clone)]
pub struct PgUserDaoImpl {
    pool: Arc<DatabasePool>,
}

impl PgUserDaoImpl {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    user_id: UserId,
    fullname: String,
    email: String,
    phone: Option<String>,
    role: String,
    address: Option<String>,
    verified: bool,
    status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            fullname: row.fullname,
            email: row.email,
            phone: row.phone,
            role: UserRole::parse(&row.role),
            address: row.address,
            verified: row.verified,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRow {
    user_id: UserId,
    email: String,
    password_hash: String,
    role: String,
    verified: bool,
}

impl From<CredentialsRow> for UserCredentials {
    fn from(row: CredentialsRow) -> Self {
        Self {
            user_id: row.user_id,
            email: row.email,
            password_hash: row.password_hash,
            role: UserRole::parse(&row.role),
            verified: row.verified,
        }
    }
}

#[async_trait]
impl UserDao for PgUserDaoImpl {
    async fn find_all(&self) -> DepublicResult<Vec<User>> {
        debug!("Finding all users");

        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: UserId) -> DepublicResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> DepublicResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_credentials(&self, email: &str) -> DepublicResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT user_id, email, password_hash, role, verified
            FROM users
            WHERE LOWER(email) = LOWER($1) AND status
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(UserCredentials::from))
    }

    async fn email_exists(&self, email: &str) -> DepublicResult<bool> {
        let result: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) LIMIT 1")
                .bind(email)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn create(&self, user: &User, password_hash: &str) -> DepublicResult<User> {
        debug!("Creating user: {}", user.email);

        let sql = format!(
            "INSERT INTO users (user_id, fullname, email, password_hash, phone, role, address, \
             verified, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.user_id)
            .bind(&user.fullname)
            .bind(&user.email)
            .bind(password_hash)
            .bind(&user.phone)
            .bind(user.role.as_str())
            .bind(&user.address)
            .bind(user.verified)
            .bind(user.status)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(row.into())
    }

    async fn update(&self, user: &User) -> DepublicResult<User> {
        debug!("Updating user: {}", user.user_id);

        let sql = format!(
            "UPDATE users SET fullname = $2, phone = $3, role = $4, address = $5, \
             verified = $6, status = $7, updated_at = NOW() \
             WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.user_id)
            .bind(&user.fullname)
            .bind(&user.phone)
            .bind(user.role.as_str())
            .bind(&user.address)
            .bind(user.verified)
            .bind(user.status)
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::from)
            .ok_or_else(|| DepublicError::not_found("User", user.user_id))
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> DepublicResult<()> {
        debug!("Updating password for user: {}", id);

        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DepublicError::not_found("User", id));
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> DepublicResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for PgUserDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgUserDaoImpl").finish_non_exhaustive()
    }
}
