use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CalendarIntegrationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalendarProvider {
    GoogleWorkspace,
    #[serde(rename = "MS_365_OUTLOOK")]
    Ms365Outlook,
}

impl CalendarProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoogleWorkspace => "GOOGLE_WORKSPACE",
            Self::Ms365Outlook => "MS_365_OUTLOOK",
        }
    }
}

/// A user's connected calendar; tokens are stored encrypted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarIntegration {
    pub id: CalendarIntegrationId,
    pub user_id: UserId,
    pub provider: CalendarProvider,
    #[serde(skip_serializing)]
    pub access_token_encrypted: String,
    #[serde(skip_serializing)]
    pub refresh_token_encrypted: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub scope: Option<String>,
    pub connected_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
