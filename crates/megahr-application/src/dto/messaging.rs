use megahr_domain::{
    entities::{CommentVisibility, MessageTemplate},
    errors::FieldViolation,
};
use serde::{Deserialize, Serialize};

use super::validate::{Validate, Violations};

pub const MAX_MESSAGE_LEN: usize = 5000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageCommand {
    pub content: String,
    #[serde(default)]
    pub is_internal_note: bool,
    pub visibility: Option<CommentVisibility>,
}

impl Validate for PostMessageCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .length("content", &self.content, 1, MAX_MESSAGE_LEN)
            .check(
                !self.is_internal_note || self.visibility.is_some(),
                "visibility",
                "Visibility is required for internal notes",
            )
            .into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplateCommand {
    pub name: String,
    pub subject: String,
    pub body: String,
    pub category: Option<String>,
}

impl Validate for MessageTemplateCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .length("name", &self.name, 1, 100)
            .length("subject", &self.subject, 1, 200)
            .required("body", &self.body)
            .into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageTemplateCommand {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
}

impl Validate for UpdateMessageTemplateCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.length("name", name, 1, 100);
        }
        if let Some(subject) = &self.subject {
            v.length("subject", subject, 1, 200);
        }
        if let Some(body) = &self.body {
            v.required("body", body);
        }
        v.into_vec()
    }
}

/// Templates of a company split by origin
#[derive(Debug, Clone, Serialize)]
pub struct MessageTemplatesGrouped {
    pub required: Vec<MessageTemplate>,
    pub custom: Vec<MessageTemplate>,
}
