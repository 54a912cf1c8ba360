use std::collections::BTreeSet;
use std::sync::Arc;

use megahr_domain::{
    entities::{Notification, NotificationType},
    repositories::{NotificationRepository, UserRepository},
    value_objects::{NotificationId, PageRequest, UserId},
};
use tracing::{info, warn};

use crate::access::Actor;
use crate::dto::{CreateNotificationCommand, NotificationFeed};
use crate::errors::{ApplicationError, ApplicationResult};

/// In-app notifications; also the delivery channel other services notify through
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
    users: Arc<dyn UserRepository>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            notifications,
            users,
        }
    }

    /// Best-effort fan-out; a failed write is logged and never fails the caller
    pub async fn notify(
        &self,
        recipients: impl IntoIterator<Item = UserId>,
        kind: NotificationType,
        message: &str,
        link: Option<String>,
    ) {
        let recipients: BTreeSet<UserId> = recipients.into_iter().collect();
        if recipients.is_empty() {
            return;
        }
        let batch: Vec<Notification> = recipients
            .into_iter()
            .map(|user_id| Notification::new(user_id, kind, message, link.clone()))
            .collect();
        if let Err(err) = self.notifications.insert(&batch).await {
            warn!(error = %err, kind = ?kind, "failed to store notifications");
        }
    }

    pub async fn create(
        &self,
        cmd: CreateNotificationCommand,
    ) -> ApplicationResult<Notification> {
        if self.users.find_by_id(cmd.user_id).await?.is_none() {
            return Err(ApplicationError::not_found("Target user not found."));
        }
        let notification =
            Notification::new(cmd.user_id, cmd.notification_type, cmd.message, cmd.link);
        self.notifications
            .insert(std::slice::from_ref(&notification))
            .await?;
        info!(notification_id = %notification.id, user_id = %cmd.user_id, "notification created");
        Ok(notification)
    }

    pub async fn list(
        &self,
        actor: &Actor,
        unread_only: bool,
        page: PageRequest,
    ) -> ApplicationResult<NotificationFeed> {
        let all = self
            .notifications
            .list_for_user(actor.user_id, unread_only)
            .await?;
        let unread_count = self.notifications.count_unread(actor.user_id).await?;
        Ok(NotificationFeed {
            page: page.apply(all),
            unread_count,
        })
    }

    pub async fn mark_read(
        &self,
        actor: &Actor,
        id: NotificationId,
    ) -> ApplicationResult<Notification> {
        let mut notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Notification not found."))?;
        if notification.user_id != actor.user_id {
            return Err(ApplicationError::forbidden(
                "Forbidden: You can only update your own notifications.",
            ));
        }
        if !notification.is_read {
            notification.is_read = true;
            self.notifications.update(&notification).await?;
        }
        Ok(notification)
    }

    pub async fn mark_all_read(&self, actor: &Actor) -> ApplicationResult<u64> {
        Ok(self.notifications.mark_all_read(actor.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use megahr_domain::{entities::User, roles::UserRole};
    use megahr_persistence::InMemoryRepositories;

    async fn service() -> (NotificationService, Actor) {
        let repos = InMemoryRepositories::default();
        let user = User::new("n@example.com", "h".into(), "N", "O", UserRole::Standard);
        repos.users.insert(&user).await.unwrap();
        let service = NotificationService::new(repos.notifications.clone(), repos.users.clone());
        (service, Actor::from_user(&user))
    }

    #[tokio::test]
    async fn notify_deduplicates_recipients() {
        let (service, actor) = service().await;
        service
            .notify(
                [actor.user_id, actor.user_id],
                NotificationType::General,
                "hello",
                None,
            )
            .await;
        let feed = service.list(&actor, false, PageRequest::default()).await.unwrap();
        assert_eq!(feed.page.total, 1);
        assert_eq!(feed.unread_count, 1);
    }

    #[tokio::test]
    async fn foreign_notifications_cannot_be_marked() {
        let (service, actor) = service().await;
        service
            .notify([UserId::new()], NotificationType::General, "x", None)
            .await;
        let stranger = Actor {
            user_id: UserId::new(),
            ..actor.clone()
        };
        let other = service.list(&stranger, false, PageRequest::default()).await.unwrap();
        assert_eq!(other.page.total, 0);

        let mine = service
            .create(CreateNotificationCommand {
                user_id: actor.user_id,
                notification_type: NotificationType::General,
                message: "mine".into(),
                link: None,
            })
            .await
            .unwrap();
        let err = service.mark_read(&stranger, mine.id).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Forbidden(_)));
        assert!(service.mark_read(&actor, mine.id).await.unwrap().is_read);
    }
}
