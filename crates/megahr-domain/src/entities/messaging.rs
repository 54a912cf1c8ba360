use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{
    ApplicationId, CompanyId, MessageId, MessageTemplateId, MessageThreadId, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentVisibility {
    Public,
    Private,
    AdminOnly,
}

/// One conversation per application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageThread {
    pub id: MessageThreadId,
    pub application_id: ApplicationId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub thread_id: MessageThreadId,
    pub sender_id: UserId,
    pub content: String,
    pub is_internal_note: bool,
    pub visibility: Option<CommentVisibility>,
    pub sent_at: DateTime<Utc>,
}

/// Reusable e-mail/message body for a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplate {
    pub id: MessageTemplateId,
    pub company_id: CompanyId,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub category: Option<String>,
    /// Required templates are seeded with the company and cannot be deleted
    pub is_required: bool,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MessageTemplate {
    /// The templates every company starts with
    pub fn required_defaults(company_id: CompanyId) -> Vec<Self> {
        const DEFAULTS: &[(&str, &str, &str, &str)] = &[
            (
                "Application Received",
                "We received your application",
                "Hi {{candidateFirstName}}, thank you for applying to {{jobTitle}}. We will be in touch soon.",
                "APPLICATION",
            ),
            (
                "Interview Invitation",
                "Interview invitation for {{jobTitle}}",
                "Hi {{candidateFirstName}}, we would like to invite you to interview for {{jobTitle}}.",
                "INTERVIEW",
            ),
            (
                "Rejection",
                "Update on your application",
                "Hi {{candidateFirstName}}, thank you for your interest in {{jobTitle}}. We have decided not to move forward.",
                "REJECTION",
            ),
            (
                "Offer",
                "Offer for {{jobTitle}}",
                "Hi {{candidateFirstName}}, we are delighted to offer you the {{jobTitle}} position.",
                "OFFER",
            ),
        ];
        let now = Utc::now();
        DEFAULTS
            .iter()
            .map(|(name, subject, body, category)| Self {
                id: MessageTemplateId::new(),
                company_id,
                name: name.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
                category: Some(category.to_string()),
                is_required: true,
                created_by: None,
                created_at: now,
                updated_at: now,
            })
            .collect()
    }
}
