use megahr_domain::{
    entities::{QuestionResponseType, QuestionVisibility},
    errors::FieldViolation,
    value_objects::QuestionId,
};
use serde::Deserialize;

use super::validate::{Validate, Violations};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCommand {
    pub text: String,
    pub response_type: QuestionResponseType,
    #[serde(default)]
    pub visibility: QuestionVisibility,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

impl Validate for QuestionCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .length("text", &self.text, 1, 1000)
            .check(
                !self.response_type.needs_options()
                    || self.options.iter().any(|o| !o.trim().is_empty()),
                "options",
                "Options are required for dropdown and multiple choice questions",
            )
            .into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionCommand {
    pub text: Option<String>,
    pub response_type: Option<QuestionResponseType>,
    pub visibility: Option<QuestionVisibility>,
    pub is_required: Option<bool>,
    pub options: Option<Vec<String>>,
}

impl Validate for UpdateQuestionCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(text) = &self.text {
            v.length("text", text, 1, 1000);
        }
        v.into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSetCommand {
    pub name: String,
    pub description: Option<String>,
    pub question_ids: Vec<QuestionId>,
}

impl Validate for QuestionSetCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .length("name", &self.name, 1, 100)
            .check(
                !self.question_ids.is_empty(),
                "questionIds",
                "A question set needs at least one question",
            )
            .into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionSetCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub question_ids: Option<Vec<QuestionId>>,
}

impl Validate for UpdateQuestionSetCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.length("name", name, 1, 100);
        }
        if let Some(ids) = &self.question_ids {
            v.check(
                !ids.is_empty(),
                "questionIds",
                "A question set needs at least one question",
            );
        }
        v.into_vec()
    }
}
