//! In-Memory Candidate Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::{Application, Candidate},
    errors::DomainResult,
    repositories::CandidateRepository,
    value_objects::{normalize_email, CandidateId, CompanyId},
};

use super::store::{insert_unique, remove_existing, replace_existing, MemoryStore};
use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of CandidateRepository
#[derive(Debug, Clone)]
pub struct InMemoryCandidateRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryCandidateRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CandidateRepository for InMemoryCandidateRepository {
    async fn insert(&self, candidate: &Candidate, application: &Application) -> DomainResult<()> {
        self.store.transaction(|t| {
            if t.candidates.values().any(|c| c.email == candidate.email) {
                return Err(PersistenceError::unique("Candidate", "email"));
            }
            insert_unique(&mut t.candidates, candidate.id, candidate.clone(), "Candidate", "id")?;
            insert_unique(
                &mut t.applications,
                application.id,
                application.clone(),
                "Application",
                "id",
            )?;
            Ok(())
        })?;
        Ok(())
    }

    async fn update(&self, candidate: &Candidate) -> DomainResult<()> {
        self.store.write(|t| {
            if t
                .candidates
                .values()
                .any(|c| c.email == candidate.email && c.id != candidate.id)
            {
                return Err(PersistenceError::unique("Candidate", "email"));
            }
            replace_existing(
                &mut t.candidates,
                candidate.id,
                candidate.clone(),
                "Candidate",
                candidate.id,
            )
        })?;
        Ok(())
    }

    async fn delete(&self, id: CandidateId) -> DomainResult<()> {
        self.store.transaction(|t| {
            remove_existing(&mut t.candidates, &id, "Candidate", id)?;
            let applications: Vec<_> = t
                .applications
                .values()
                .filter(|a| a.candidate_id == id)
                .map(|a| a.id)
                .collect();
            t.purge_applications(&applications);
            for meeting in t.meetings.values_mut() {
                if meeting
                    .application_id
                    .is_some_and(|a| applications.contains(&a))
                {
                    meeting.application_id = None;
                }
            }
            Ok(())
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: CandidateId) -> DomainResult<Option<Candidate>> {
        Ok(self.store.read(|t| t.candidates.get(&id).cloned()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Candidate>> {
        let email = normalize_email(email);
        Ok(self
            .store
            .read(|t| t.candidates.values().find(|c| c.email == email).cloned()))
    }

    async fn list_for_company(
        &self,
        company_id: CompanyId,
    ) -> DomainResult<Vec<(Candidate, Vec<Application>)>> {
        let mut rows: Vec<(Candidate, Vec<Application>)> = self.store.read(|t| {
            t.candidates
                .values()
                .filter_map(|c| {
                    let mut applications: Vec<Application> = t
                        .applications
                        .values()
                        .filter(|a| {
                            a.candidate_id == c.id
                                && t.jobs.get(&a.job_id).is_some_and(|j| j.company_id == company_id)
                        })
                        .cloned()
                        .collect();
                    applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
                    (!applications.is_empty()).then(|| (c.clone(), applications))
                })
                .collect()
        });
        rows.sort_by(|a, b| b.0.created_at.cmp(&a.0.created_at));
        Ok(rows)
    }
}
