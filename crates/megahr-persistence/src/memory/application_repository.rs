//! In-Memory Application Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::{Application, StageTransition},
    errors::DomainResult,
    repositories::ApplicationRepository,
    value_objects::{ApplicationId, CandidateId, JobId},
};

use super::store::{replace_existing, MemoryStore};

/// Thread-safe in-memory implementation of ApplicationRepository
#[derive(Debug, Clone)]
pub struct InMemoryApplicationRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryApplicationRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn find_by_id(&self, id: ApplicationId) -> DomainResult<Option<Application>> {
        Ok(self.store.read(|t| t.applications.get(&id).cloned()))
    }

    async fn list_by_candidate(
        &self,
        candidate_id: CandidateId,
    ) -> DomainResult<Vec<Application>> {
        let mut applications: Vec<Application> = self.store.read(|t| {
            t.applications
                .values()
                .filter(|a| a.candidate_id == candidate_id)
                .cloned()
                .collect()
        });
        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(applications)
    }

    async fn list_by_job(&self, job_id: JobId) -> DomainResult<Vec<Application>> {
        let mut applications: Vec<Application> = self.store.read(|t| {
            t.applications
                .values()
                .filter(|a| a.job_id == job_id)
                .cloned()
                .collect()
        });
        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(applications)
    }

    async fn update(&self, application: &Application) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(
                &mut t.applications,
                application.id,
                application.clone(),
                "Application",
                application.id,
            )
        })?;
        Ok(())
    }

    async fn record_transition(
        &self,
        application: &Application,
        transition: &StageTransition,
    ) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(
                &mut t.applications,
                application.id,
                application.clone(),
                "Application",
                application.id,
            )?;
            t.transitions.push(transition.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn list_transitions(
        &self,
        application_id: ApplicationId,
    ) -> DomainResult<Vec<StageTransition>> {
        Ok(self.store.read(|t| {
            t.transitions
                .iter()
                .filter(|tr| tr.application_id == application_id)
                .cloned()
                .collect()
        }))
    }
}
