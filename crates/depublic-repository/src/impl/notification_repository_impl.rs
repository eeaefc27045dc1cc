//! `NotificationRepositoryImpl`: cached notification repository.
//!
//! Only the admin listing (`GetAllNotifications`) is cached. A user's inbox
//! mixes personal rows with broadcasts and is read from the database.

use crate::cache::{cache_keys, CacheStore, ReadThroughCache};
use crate::{dao::NotificationDao, traits::NotificationRepository};
use async_trait::async_trait;
use depublic_core::{DepublicResult, Notification, NotificationId, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Repository implementation that caches [`NotificationDao`] reads.
pub struct NotificationRepositoryImpl {
    notification_dao: Arc<dyn NotificationDao>,
    cache: ReadThroughCache,
}

impl NotificationRepositoryImpl {
    #[must_use]
    pub fn new(
        notification_dao: Arc<dyn NotificationDao>,
        store: Arc<dyn CacheStore>,
        ttl: Duration,
    ) -> Self {
        Self {
            notification_dao,
            cache: ReadThroughCache::new(store, ttl, "notification"),
        }
    }
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Notification>> {
        debug!("Repository: find_all notifications");
        self.cache
            .fetch(cache_keys::ALL_NOTIFICATIONS, || self.notification_dao.find_all())
            .await
    }

    async fn find_for_user(&self, user_id: UserId) -> DepublicResult<Vec<Notification>> {
        self.notification_dao.find_for_user(user_id).await
    }

    async fn create(&self, notification: &Notification) -> DepublicResult<Notification> {
        debug!("Repository: create {} notification", notification.kind);
        let created = self.notification_dao.create(notification).await?;
        self.cache.invalidate(&[cache_keys::ALL_NOTIFICATIONS]).await;
        Ok(created)
    }

    async fn mark_read(&self, id: NotificationId) -> DepublicResult<Notification> {
        let updated = self.notification_dao.mark_read(id).await?;
        self.cache.invalidate(&[cache_keys::ALL_NOTIFICATIONS]).await;
        Ok(updated)
    }

    async fn delete(&self, id: NotificationId) -> DepublicResult<bool> {
        debug!("Repository: delete notification {}", id);
        let deleted = self.notification_dao.delete(id).await?;
        self.cache.invalidate(&[cache_keys::ALL_NOTIFICATIONS]).await;
        Ok(deleted)
    }
}

impl std::fmt::Debug for NotificationRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationRepositoryImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
