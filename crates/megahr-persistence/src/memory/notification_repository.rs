//! In-Memory Notification Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::Notification,
    errors::DomainResult,
    repositories::NotificationRepository,
    value_objects::{NotificationId, UserId},
};

use super::store::{replace_existing, MemoryStore};

/// Thread-safe in-memory implementation of NotificationRepository
#[derive(Debug, Clone)]
pub struct InMemoryNotificationRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryNotificationRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert(&self, notifications: &[Notification]) -> DomainResult<()> {
        self.store.write(|t| {
            for n in notifications {
                t.notifications.insert(n.id, n.clone());
            }
            Ok(())
        })?;
        Ok(())
    }

    async fn update(&self, notification: &Notification) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(
                &mut t.notifications,
                notification.id,
                notification.clone(),
                "Notification",
                notification.id,
            )
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: NotificationId) -> DomainResult<Option<Notification>> {
        Ok(self.store.read(|t| t.notifications.get(&id).cloned()))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        unread_only: bool,
    ) -> DomainResult<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self.store.read(|t| {
            t.notifications
                .values()
                .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read))
                .cloned()
                .collect()
        });
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn count_unread(&self, user_id: UserId) -> DomainResult<u64> {
        Ok(self.store.read(|t| {
            t.notifications
                .values()
                .filter(|n| n.user_id == user_id && !n.is_read)
                .count() as u64
        }))
    }

    async fn mark_all_read(&self, user_id: UserId) -> DomainResult<u64> {
        let changed = self.store.write(|t| {
            let mut changed = 0;
            for n in t
                .notifications
                .values_mut()
                .filter(|n| n.user_id == user_id && !n.is_read)
            {
                n.is_read = true;
                changed += 1;
            }
            Ok(changed)
        })?;
        Ok(changed)
    }
}
