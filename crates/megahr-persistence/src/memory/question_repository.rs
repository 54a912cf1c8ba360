//! In-Memory Question Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::{Question, QuestionSet},
    errors::DomainResult,
    repositories::QuestionRepository,
    value_objects::{CompanyId, QuestionId, QuestionSetId},
};

use super::store::{insert_unique, remove_existing, replace_existing, MemoryStore};

/// Thread-safe in-memory implementation of QuestionRepository
#[derive(Debug, Clone)]
pub struct InMemoryQuestionRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryQuestionRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn list_questions(&self, company_id: CompanyId) -> DomainResult<Vec<Question>> {
        let mut questions: Vec<Question> = self.store.read(|t| {
            t.questions
                .values()
                .filter(|q| q.company_id == company_id)
                .cloned()
                .collect()
        });
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(questions)
    }

    async fn find_question(&self, id: QuestionId) -> DomainResult<Option<Question>> {
        Ok(self.store.read(|t| t.questions.get(&id).cloned()))
    }

    async fn insert_question(&self, question: &Question) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(&mut t.questions, question.id, question.clone(), "Question", "id")
        })?;
        Ok(())
    }

    async fn update_question(&self, question: &Question) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(
                &mut t.questions,
                question.id,
                question.clone(),
                "Question",
                question.id,
            )
        })?;
        Ok(())
    }

    async fn delete_question(&self, id: QuestionId) -> DomainResult<()> {
        self.store
            .write(|t| remove_existing(&mut t.questions, &id, "Question", id).map(|_| ()))?;
        Ok(())
    }

    async fn list_sets(&self, company_id: CompanyId) -> DomainResult<Vec<QuestionSet>> {
        let mut sets: Vec<QuestionSet> = self.store.read(|t| {
            t.question_sets
                .values()
                .filter(|s| s.company_id == company_id)
                .cloned()
                .collect()
        });
        sets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sets)
    }

    async fn find_set(&self, id: QuestionSetId) -> DomainResult<Option<QuestionSet>> {
        Ok(self.store.read(|t| t.question_sets.get(&id).cloned()))
    }

    async fn insert_set(&self, set: &QuestionSet) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(&mut t.question_sets, set.id, set.clone(), "QuestionSet", "id")
        })?;
        Ok(())
    }

    async fn update_set(&self, set: &QuestionSet) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(&mut t.question_sets, set.id, set.clone(), "QuestionSet", set.id)
        })?;
        Ok(())
    }

    async fn delete_set(&self, id: QuestionSetId) -> DomainResult<()> {
        self.store
            .write(|t| remove_existing(&mut t.question_sets, &id, "QuestionSet", id).map(|_| ()))?;
        Ok(())
    }

    async fn sets_referencing(&self, question_id: QuestionId) -> DomainResult<Vec<QuestionSet>> {
        Ok(self.store.read(|t| {
            t.question_sets
                .values()
                .filter(|s| s.question_ids.contains(&question_id))
                .cloned()
                .collect()
        }))
    }
}
