//! PostgreSQL notification DAO.

use crate::{dao::NotificationDao, pool::DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use depublic_core::{
    DepublicError, DepublicResult, Notification, NotificationId, NotificationKind, UserId,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

// `type` is reserved in Rust, so the column is aliased on the way out.
const NOTIFICATION_COLUMNS: &str =
    "notification_id, user_id, type AS kind, message, is_read, created_at";

/// PostgreSQL implementation of [`NotificationDao`].
#[derive(Clone)]
pub struct PgNotificationDaoImpl {
    pool: Arc<DatabasePool>,
}

impl PgNotificationDaoImpl {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRow {
    notification_id: NotificationId,
    user_id: Option<UserId>,
    kind: String,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            notification_id: row.notification_id,
            user_id: row.user_id,
            kind: NotificationKind::parse(&row.kind),
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl NotificationDao for PgNotificationDaoImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Notification>> {
        debug!("Finding all notifications");

        let sql = format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, NotificationRow>(&sql)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn find_for_user(&self, user_id: UserId) -> DepublicResult<Vec<Notification>> {
        debug!("Finding notifications for user: {}", user_id);

        let sql = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications \
             WHERE user_id = $1 OR user_id IS NULL ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, NotificationRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn create(&self, notification: &Notification) -> DepublicResult<Notification> {
        debug!("Creating {} notification", notification.kind);

        let sql = format!(
            "INSERT INTO notifications (notification_id, user_id, type, message, is_read, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {NOTIFICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, NotificationRow>(&sql)
            .bind(notification.notification_id)
            .bind(notification.user_id)
            .bind(notification.kind.as_str())
            .bind(&notification.message)
            .bind(notification.is_read)
            .bind(notification.created_at)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(row.into())
    }

    async fn mark_read(&self, id: NotificationId) -> DepublicResult<Notification> {
        debug!("Marking notification {} as read", id);

        let sql = format!(
            "UPDATE notifications SET is_read = TRUE WHERE notification_id = $1 \
             RETURNING {NOTIFICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, NotificationRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Notification::from)
            .ok_or_else(|| DepublicError::not_found("Notification", id))
    }

    async fn delete(&self, id: NotificationId) -> DepublicResult<bool> {
        debug!("Deleting notification: {}", id);

        let result = sqlx::query("DELETE FROM notifications WHERE notification_id = $1")
            .bind(id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for PgNotificationDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgNotificationDaoImpl").finish_non_exhaustive()
    }
}
