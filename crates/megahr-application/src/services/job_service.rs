//! Job requisitions and their hiring teams

use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{Job, JobFilter, JobHiringMember},
    repositories::{CompanyRepository, JobRepository, OrganizationRepository},
    value_objects::{CompanyId, DepartmentId, JobId, LocationId, Page, PageRequest, UserId},
};
use tracing::{debug, info};

use super::Repositories;
use crate::access::{AccessPolicy, Actor};
use crate::dto::{CreateJobCommand, HiringTeamInput, JobDetails, UpdateJobCommand};
use crate::errors::{ApplicationError, ApplicationResult};

pub struct JobService {
    jobs: Arc<dyn JobRepository>,
    companies: Arc<dyn CompanyRepository>,
    organization: Arc<dyn OrganizationRepository>,
    policy: Arc<AccessPolicy>,
}

impl JobService {
    pub fn new(repos: &Repositories, policy: Arc<AccessPolicy>) -> Self {
        Self {
            jobs: repos.jobs.clone(),
            companies: repos.companies.clone(),
            organization: repos.organization.clone(),
            policy,
        }
    }

    pub async fn create(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        cmd: CreateJobCommand,
    ) -> ApplicationResult<JobDetails> {
        self.policy.load_company(company_id).await?;
        self.policy.require_hiring_access(actor, company_id).await?;
        self.check_placement(company_id, cmd.department_id, cmd.location_id)
            .await?;

        let now = Utc::now();
        let job = Job {
            id: JobId::new(),
            company_id,
            title: cmd.title.trim().to_string(),
            description: cmd.description,
            employment_type: cmd.employment_type,
            work_type: cmd.work_type,
            status: cmd.status.unwrap_or_default(),
            salary_min: cmd.salary_min,
            salary_max: cmd.salary_max,
            currency: cmd.currency,
            pay_period: cmd.pay_period,
            display_salary: cmd.display_salary.unwrap_or(true),
            job_code: cmd.job_code,
            department_id: cmd.department_id,
            location_id: cmd.location_id,
            min_years_experience: cmd.min_years_experience,
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
        };
        job.check_salary()?;

        let mut hiring_team = Vec::with_capacity(cmd.hiring_team.len());
        for input in cmd.hiring_team {
            self.require_company_member(company_id, input.user_id).await?;
            if hiring_team.iter().any(|m: &JobHiringMember| m.user_id == input.user_id) {
                continue;
            }
            hiring_team.push(team_member(job.id, input));
        }

        self.jobs.insert(&job, &hiring_team).await?;
        info!(job_id = %job.id, company_id = %company_id, "job created");
        Ok(JobDetails { job, hiring_team })
    }

    pub async fn list(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        filter: JobFilter,
        page: PageRequest,
    ) -> ApplicationResult<Page<Job>> {
        self.policy.require_review_access(actor, company_id).await?;
        let jobs = self.jobs.list_by_company(company_id, &filter).await?;
        debug!(company_id = %company_id, total = jobs.len(), "jobs listed");
        Ok(page.apply(jobs))
    }

    pub async fn get(&self, actor: &Actor, job_id: JobId) -> ApplicationResult<JobDetails> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_review_access(actor, job.company_id).await?;
        let hiring_team = self.jobs.list_hiring_team(job_id).await?;
        Ok(JobDetails { job, hiring_team })
    }

    pub async fn update(
        &self,
        actor: &Actor,
        job_id: JobId,
        cmd: UpdateJobCommand,
    ) -> ApplicationResult<Job> {
        let mut job = self.policy.load_job(job_id).await?;
        self.policy.require_hiring_access(actor, job.company_id).await?;
        self.check_placement(job.company_id, cmd.department_id, cmd.location_id)
            .await?;

        if let Some(title) = cmd.title {
            job.title = title.trim().to_string();
        }
        if let Some(description) = cmd.description {
            job.description = description;
        }
        if let Some(v) = cmd.employment_type {
            job.employment_type = v;
        }
        if let Some(v) = cmd.work_type {
            job.work_type = v;
        }
        if let Some(v) = cmd.status {
            job.status = v;
        }
        if cmd.salary_min.is_some() {
            job.salary_min = cmd.salary_min;
        }
        if cmd.salary_max.is_some() {
            job.salary_max = cmd.salary_max;
        }
        if cmd.currency.is_some() {
            job.currency = cmd.currency;
        }
        if cmd.pay_period.is_some() {
            job.pay_period = cmd.pay_period;
        }
        if let Some(v) = cmd.display_salary {
            job.display_salary = v;
        }
        if cmd.job_code.is_some() {
            job.job_code = cmd.job_code;
        }
        if cmd.department_id.is_some() {
            job.department_id = cmd.department_id;
        }
        if cmd.location_id.is_some() {
            job.location_id = cmd.location_id;
        }
        if cmd.min_years_experience.is_some() {
            job.min_years_experience = cmd.min_years_experience;
        }
        job.check_salary()?;
        job.updated_at = Utc::now();

        self.jobs.update(&job).await?;
        info!(job_id = %job.id, "job updated");
        Ok(job)
    }

    /// Delete a job together with its team, workflow, assistant configs and applications
    pub async fn delete(&self, actor: &Actor, job_id: JobId) -> ApplicationResult<()> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_hiring_access(actor, job.company_id).await?;
        self.jobs.delete(job_id).await?;
        info!(job_id = %job_id, "job deleted");
        Ok(())
    }

    pub async fn hiring_team(
        &self,
        actor: &Actor,
        job_id: JobId,
    ) -> ApplicationResult<Vec<JobHiringMember>> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_review_access(actor, job.company_id).await?;
        Ok(self.jobs.list_hiring_team(job_id).await?)
    }

    pub async fn add_hiring_member(
        &self,
        actor: &Actor,
        job_id: JobId,
        input: HiringTeamInput,
    ) -> ApplicationResult<JobHiringMember> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_hiring_access(actor, job.company_id).await?;
        self.require_company_member(job.company_id, input.user_id).await?;
        if self.jobs.find_hiring_member(job_id, input.user_id).await?.is_some() {
            return Err(ApplicationError::conflict(
                "User is already on this job's hiring team.",
            ));
        }

        let member = team_member(job_id, input);
        self.jobs.add_hiring_member(&member).await?;
        info!(job_id = %job_id, user_id = %member.user_id, "hiring team member added");
        Ok(member)
    }

    pub async fn remove_hiring_member(
        &self,
        actor: &Actor,
        job_id: JobId,
        user_id: UserId,
    ) -> ApplicationResult<()> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_hiring_access(actor, job.company_id).await?;
        if self.jobs.find_hiring_member(job_id, user_id).await?.is_none() {
            return Err(ApplicationError::not_found(
                "User is not on this job's hiring team.",
            ));
        }
        Ok(self.jobs.remove_hiring_member(job_id, user_id).await?)
    }

    async fn require_company_member(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> ApplicationResult<()> {
        match self.companies.find_member(company_id, user_id).await? {
            Some(_) => Ok(()),
            None => Err(ApplicationError::bad_request(format!(
                "User {user_id} is not a member of this company."
            ))),
        }
    }

    async fn check_placement(
        &self,
        company_id: CompanyId,
        department_id: Option<DepartmentId>,
        location_id: Option<LocationId>,
    ) -> ApplicationResult<()> {
        if let Some(id) = department_id {
            let owned = self
                .organization
                .find_department(id)
                .await?
                .is_some_and(|d| d.company_id == company_id);
            if !owned {
                return Err(ApplicationError::bad_request(
                    "Department does not belong to this company.",
                ));
            }
        }
        if let Some(id) = location_id {
            let owned = self
                .organization
                .find_location(id)
                .await?
                .is_some_and(|l| l.company_id == company_id);
            if !owned {
                return Err(ApplicationError::bad_request(
                    "Location does not belong to this company.",
                ));
            }
        }
        Ok(())
    }
}

fn team_member(job_id: JobId, input: HiringTeamInput) -> JobHiringMember {
    JobHiringMember {
        job_id,
        user_id: input.user_id,
        role: input.role,
        is_external_recruiter: input.is_external_recruiter,
        added_at: Utc::now(),
    }
}
