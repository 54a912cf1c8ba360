use megahr_domain::{
    entities::{Notification, NotificationType},
    errors::FieldViolation,
    value_objects::{Page, UserId},
};
use serde::Deserialize;

use super::validate::{Validate, Violations};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationCommand {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub message: String,
    pub link: Option<String>,
}

impl Validate for CreateNotificationCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .length("message", &self.message, 1, 1000)
            .into_vec()
    }
}

/// One page of a user's notifications and their unread total
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    pub page: Page<Notification>,
    pub unread_count: u64,
}
