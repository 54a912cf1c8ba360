use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{NotificationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    NewCandidate,
    InterviewScheduled,
    NewMessage,
    StageChanged,
    RatingSubmitted,
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub message: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: UserId,
        notification_type: NotificationType,
        message: impl Into<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            notification_type,
            message: message.into(),
            link,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
