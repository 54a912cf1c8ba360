use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{CompanyId, QuestionId, QuestionSetId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionResponseType {
    ShortText,
    Paragraph,
    YesNo,
    Dropdown,
    MultipleChoice,
    Number,
    File,
}

impl QuestionResponseType {
    pub fn needs_options(self) -> bool {
        matches!(self, Self::Dropdown | Self::MultipleChoice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionVisibility {
    #[default]
    Public,
    Private,
}

/// Screening question from a company's question bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub company_id: CompanyId,
    pub text: String,
    pub response_type: QuestionResponseType,
    pub visibility: QuestionVisibility,
    pub is_required: bool,
    pub options: Vec<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Choice questions need at least one non-blank option; others carry none
    pub fn check_options(&mut self) -> DomainResult<()> {
        self.options.retain(|o| !o.trim().is_empty());
        if self.response_type.needs_options() {
            if self.options.is_empty() {
                return Err(DomainError::validation(
                    "options",
                    "Options are required for dropdown and multiple choice questions",
                ));
            }
        } else {
            self.options.clear();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    pub id: QuestionSetId,
    pub company_id: CompanyId,
    pub name: String,
    pub description: Option<String>,
    pub question_ids: Vec<QuestionId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(response_type: QuestionResponseType, options: &[&str]) -> Question {
        let now = Utc::now();
        Question {
            id: QuestionId::new(),
            company_id: CompanyId::new(),
            text: "Why us?".into(),
            response_type,
            visibility: QuestionVisibility::Public,
            is_required: false,
            options: options.iter().map(|o| o.to_string()).collect(),
            created_by: UserId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn dropdown_without_options_is_rejected() {
        assert!(question(QuestionResponseType::Dropdown, &[" "]).check_options().is_err());
        assert!(question(QuestionResponseType::Dropdown, &["a"]).check_options().is_ok());
    }

    #[test]
    fn free_text_drops_options() {
        let mut q = question(QuestionResponseType::ShortText, &["a"]);
        q.check_options().unwrap();
        assert!(q.options.is_empty());
    }

    #[test]
    fn response_types_are_snake_case() {
        let t: QuestionResponseType = serde_json::from_str("\"multiple_choice\"").unwrap();
        assert_eq!(t, QuestionResponseType::MultipleChoice);
    }
}
