//! NotificationDao trait.

use async_trait::async_trait;
use depublic_core::{DepublicResult, Notification, NotificationId, UserId};

/// Low-level notification data access object.
#[async_trait]
pub trait NotificationDao: Send + Sync {
    /// Lists every notification, newest first.
    async fn find_all(&self) -> DepublicResult<Vec<Notification>>;

    /// Lists the notifications addressed to `user_id` plus every broadcast.
    async fn find_for_user(&self, user_id: UserId) -> DepublicResult<Vec<Notification>>;

    /// Persists a new notification.
    async fn create(&self, notification: &Notification) -> DepublicResult<Notification>;

    /// Marks a notification as read. Fails with `NotFound` if it is gone.
    async fn mark_read(&self, id: NotificationId) -> DepublicResult<Notification>;

    /// Deletes a notification by ID. Returns `true` if deleted.
    async fn delete(&self, id: NotificationId) -> DepublicResult<bool>;
}
