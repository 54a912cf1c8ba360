//! In-Memory Rating Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::{CandidateRating, RatingCardTemplate},
    errors::DomainResult,
    repositories::RatingRepository,
    value_objects::{ApplicationId, CompanyId, RatingCardTemplateId},
};

use super::store::{insert_unique, remove_existing, replace_existing, MemoryStore};

/// Thread-safe in-memory implementation of RatingRepository
#[derive(Debug, Clone)]
pub struct InMemoryRatingRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryRatingRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn insert_template(&self, template: &RatingCardTemplate) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(
                &mut t.rating_templates,
                template.id,
                template.clone(),
                "RatingCardTemplate",
                "id",
            )
        })?;
        Ok(())
    }

    async fn update_template(&self, template: &RatingCardTemplate) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(
                &mut t.rating_templates,
                template.id,
                template.clone(),
                "RatingCardTemplate",
                template.id,
            )
        })?;
        Ok(())
    }

    async fn delete_template(&self, id: RatingCardTemplateId) -> DomainResult<()> {
        self.store.write(|t| {
            remove_existing(&mut t.rating_templates, &id, "RatingCardTemplate", id).map(|_| ())
        })?;
        Ok(())
    }

    async fn find_template(
        &self,
        id: RatingCardTemplateId,
    ) -> DomainResult<Option<RatingCardTemplate>> {
        Ok(self.store.read(|t| t.rating_templates.get(&id).cloned()))
    }

    async fn list_templates(
        &self,
        company_id: CompanyId,
    ) -> DomainResult<Vec<RatingCardTemplate>> {
        let mut templates: Vec<RatingCardTemplate> = self.store.read(|t| {
            t.rating_templates
                .values()
                .filter(|r| r.company_id == company_id)
                .cloned()
                .collect()
        });
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn count_ratings_for_template(&self, id: RatingCardTemplateId) -> DomainResult<usize> {
        Ok(self
            .store
            .read(|t| t.ratings.values().filter(|r| r.template_id == id).count()))
    }

    async fn insert_rating(&self, rating: &CandidateRating) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(&mut t.ratings, rating.id, rating.clone(), "CandidateRating", "id")
        })?;
        Ok(())
    }

    async fn list_ratings(
        &self,
        application_id: ApplicationId,
    ) -> DomainResult<Vec<CandidateRating>> {
        let mut ratings: Vec<CandidateRating> = self.store.read(|t| {
            t.ratings
                .values()
                .filter(|r| r.application_id == application_id)
                .cloned()
                .collect()
        });
        ratings.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(ratings)
    }
}
