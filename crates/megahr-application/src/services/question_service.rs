//! Company question bank and question sets

use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{Question, QuestionSet},
    errors::FieldViolation,
    repositories::QuestionRepository,
    value_objects::{CompanyId, QuestionId, QuestionSetId},
};
use tracing::info;

use crate::access::{AccessPolicy, Actor};
use crate::dto::{
    QuestionCommand, QuestionSetCommand, UpdateQuestionCommand, UpdateQuestionSetCommand,
};
use crate::errors::{ApplicationError, ApplicationResult};

pub const QUESTION_IN_USE: &str =
    "Cannot delete question: it is used in one or more question sets.";

pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    policy: Arc<AccessPolicy>,
}

impl QuestionService {
    pub fn new(questions: Arc<dyn QuestionRepository>, policy: Arc<AccessPolicy>) -> Self {
        Self { questions, policy }
    }

    pub async fn list_questions(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<Vec<Question>> {
        self.policy.require_member(actor, company_id).await?;
        Ok(self.questions.list_questions(company_id).await?)
    }

    pub async fn create_question(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        cmd: QuestionCommand,
    ) -> ApplicationResult<Question> {
        self.policy.load_company(company_id).await?;
        self.policy.require_hiring_access(actor, company_id).await?;
        let now = Utc::now();
        let mut question = Question {
            id: QuestionId::new(),
            company_id,
            text: cmd.text.trim().to_string(),
            response_type: cmd.response_type,
            visibility: cmd.visibility,
            is_required: cmd.is_required,
            options: cmd.options,
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
        };
        question.check_options()?;
        self.questions.insert_question(&question).await?;
        info!(question_id = %question.id, company_id = %company_id, "question created");
        Ok(question)
    }

    pub async fn get_question(&self, actor: &Actor, id: QuestionId) -> ApplicationResult<Question> {
        let question = self.load_question(id).await?;
        self.policy.require_member(actor, question.company_id).await?;
        Ok(question)
    }

    pub async fn update_question(
        &self,
        actor: &Actor,
        id: QuestionId,
        cmd: UpdateQuestionCommand,
    ) -> ApplicationResult<Question> {
        let mut question = self.load_question(id).await?;
        self.policy
            .require_hiring_access(actor, question.company_id)
            .await?;
        if let Some(text) = cmd.text {
            question.text = text.trim().to_string();
        }
        if let Some(v) = cmd.response_type {
            question.response_type = v;
        }
        if let Some(v) = cmd.visibility {
            question.visibility = v;
        }
        if let Some(v) = cmd.is_required {
            question.is_required = v;
        }
        if let Some(options) = cmd.options {
            question.options = options;
        }
        question.check_options()?;
        question.updated_at = Utc::now();
        self.questions.update_question(&question).await?;
        Ok(question)
    }

    /// Delete a question no set refers to
    pub async fn delete_question(&self, actor: &Actor, id: QuestionId) -> ApplicationResult<()> {
        let question = self.load_question(id).await?;
        self.policy
            .require_hiring_access(actor, question.company_id)
            .await?;
        if !self.questions.sets_referencing(id).await?.is_empty() {
            return Err(ApplicationError::bad_request(QUESTION_IN_USE));
        }
        self.questions.delete_question(id).await?;
        info!(question_id = %id, "question deleted");
        Ok(())
    }

    // Sets

    pub async fn list_sets(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<Vec<QuestionSet>> {
        self.policy.require_member(actor, company_id).await?;
        Ok(self.questions.list_sets(company_id).await?)
    }

    pub async fn create_set(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        cmd: QuestionSetCommand,
    ) -> ApplicationResult<QuestionSet> {
        self.policy.load_company(company_id).await?;
        self.policy.require_hiring_access(actor, company_id).await?;
        let question_ids = self.owned_questions(company_id, cmd.question_ids).await?;
        let now = Utc::now();
        let set = QuestionSet {
            id: QuestionSetId::new(),
            company_id,
            name: cmd.name.trim().to_string(),
            description: cmd.description,
            question_ids,
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
        };
        self.questions.insert_set(&set).await?;
        info!(set_id = %set.id, questions = set.question_ids.len(), "question set created");
        Ok(set)
    }

    pub async fn get_set(
        &self,
        actor: &Actor,
        id: QuestionSetId,
    ) -> ApplicationResult<QuestionSet> {
        let set = self.load_set(id).await?;
        self.policy.require_member(actor, set.company_id).await?;
        Ok(set)
    }

    pub async fn update_set(
        &self,
        actor: &Actor,
        id: QuestionSetId,
        cmd: UpdateQuestionSetCommand,
    ) -> ApplicationResult<QuestionSet> {
        let mut set = self.load_set(id).await?;
        self.policy.require_hiring_access(actor, set.company_id).await?;
        if let Some(name) = cmd.name {
            set.name = name.trim().to_string();
        }
        if cmd.description.is_some() {
            set.description = cmd.description;
        }
        if let Some(ids) = cmd.question_ids {
            set.question_ids = self.owned_questions(set.company_id, ids).await?;
        }
        set.updated_at = Utc::now();
        self.questions.update_set(&set).await?;
        Ok(set)
    }

    pub async fn delete_set(&self, actor: &Actor, id: QuestionSetId) -> ApplicationResult<()> {
        let set = self.load_set(id).await?;
        self.policy.require_hiring_access(actor, set.company_id).await?;
        Ok(self.questions.delete_set(id).await?)
    }

    /// Deduplicated ids, every one a question of the company
    async fn owned_questions(
        &self,
        company_id: CompanyId,
        ids: Vec<QuestionId>,
    ) -> ApplicationResult<Vec<QuestionId>> {
        if ids.is_empty() {
            return Err(ApplicationError::validation(
                "questionIds",
                "A question set needs at least one question",
            ));
        }
        let mut unique = Vec::with_capacity(ids.len());
        let mut errors = Vec::new();
        for (i, id) in ids.into_iter().enumerate() {
            let owned = self
                .questions
                .find_question(id)
                .await?
                .is_some_and(|q| q.company_id == company_id);
            if !owned {
                errors.push(FieldViolation::new(
                    format!("questionIds.{i}"),
                    format!("Question {id} does not belong to this company"),
                ));
            } else if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if !errors.is_empty() {
            return Err(ApplicationError::Validation {
                message: "One or more questions do not belong to this company.".to_string(),
                errors,
            });
        }
        Ok(unique)
    }

    async fn load_question(&self, id: QuestionId) -> ApplicationResult<Question> {
        self.questions
            .find_question(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Question not found."))
    }

    async fn load_set(&self, id: QuestionSetId) -> ApplicationResult<QuestionSet> {
        self.questions
            .find_set(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Question set not found."))
    }
}
