//! In-Memory Job Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::{Job, JobFilter, JobHiringMember},
    errors::DomainResult,
    repositories::JobRepository,
    value_objects::{CompanyId, JobId, UserId},
};

use super::store::{insert_unique, remove_existing, replace_existing, MemoryStore};

/// Thread-safe in-memory implementation of JobRepository
#[derive(Debug, Clone)]
pub struct InMemoryJobRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryJobRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, job: &Job, hiring_team: &[JobHiringMember]) -> DomainResult<()> {
        self.store.transaction(|t| {
            insert_unique(&mut t.jobs, job.id, job.clone(), "Job", "id")?;
            for member in hiring_team {
                insert_unique(
                    &mut t.hiring_team,
                    (member.job_id, member.user_id),
                    member.clone(),
                    "JobHiringMember",
                    "jobId, userId",
                )?;
            }
            Ok(())
        })?;
        Ok(())
    }

    async fn update(&self, job: &Job) -> DomainResult<()> {
        self.store
            .write(|t| replace_existing(&mut t.jobs, job.id, job.clone(), "Job", job.id))?;
        Ok(())
    }

    async fn delete(&self, id: JobId) -> DomainResult<()> {
        self.store.transaction(|t| {
            remove_existing(&mut t.jobs, &id, "Job", id)?;
            t.hiring_team.retain(|(job_id, _), _| *job_id != id);
            t.job_workflows.remove(&id);
            t.screening_configs.remove(&id);
            t.scheduling_configs.remove(&id);
            let applications: Vec<_> = t
                .applications
                .values()
                .filter(|a| a.job_id == id)
                .map(|a| a.id)
                .collect();
            t.purge_applications(&applications);
            for meeting in t.meetings.values_mut().filter(|m| m.job_id == Some(id)) {
                meeting.job_id = None;
            }
            Ok(())
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: JobId) -> DomainResult<Option<Job>> {
        Ok(self.store.read(|t| t.jobs.get(&id).cloned()))
    }

    async fn list_by_company(
        &self,
        company_id: CompanyId,
        filter: &JobFilter,
    ) -> DomainResult<Vec<Job>> {
        let mut jobs: Vec<Job> = self.store.read(|t| {
            t.jobs
                .values()
                .filter(|j| j.company_id == company_id && filter.matches(j))
                .cloned()
                .collect()
        });
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn list_hiring_team(&self, job_id: JobId) -> DomainResult<Vec<JobHiringMember>> {
        let mut team: Vec<JobHiringMember> = self.store.read(|t| {
            t.hiring_team
                .values()
                .filter(|m| m.job_id == job_id)
                .cloned()
                .collect()
        });
        team.sort_by_key(|m| m.added_at);
        Ok(team)
    }

    async fn find_hiring_member(
        &self,
        job_id: JobId,
        user_id: UserId,
    ) -> DomainResult<Option<JobHiringMember>> {
        Ok(self
            .store
            .read(|t| t.hiring_team.get(&(job_id, user_id)).cloned()))
    }

    async fn add_hiring_member(&self, member: &JobHiringMember) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(
                &mut t.hiring_team,
                (member.job_id, member.user_id),
                member.clone(),
                "JobHiringMember",
                "jobId, userId",
            )
        })?;
        Ok(())
    }

    async fn remove_hiring_member(&self, job_id: JobId, user_id: UserId) -> DomainResult<()> {
        self.store.write(|t| {
            remove_existing(&mut t.hiring_team, &(job_id, user_id), "JobHiringMember", user_id)
                .map(|_| ())
        })?;
        Ok(())
    }
}
