//! Company-scoped access policy
//!
//! Every permission rule of the platform is expressed here once; services ask the
//! policy instead of repeating membership lookups. Mega admins pass every check.

use std::sync::Arc;

use megahr_domain::{
    entities::{Company, CompanyMember, Job, User},
    repositories::{CompanyRepository, JobRepository},
    roles::{CompanyMemberRole, UserRole},
    value_objects::{CompanyId, JobId, UserId},
};
use tracing::warn;

use crate::errors::{ApplicationError, ApplicationResult};

pub const NOT_A_MEMBER: &str = "Forbidden: You are not a member of this company.";
pub const NOT_RECRUITING_ADMIN: &str =
    "Forbidden: You must be a Recruiting Admin for this company.";
pub const NOT_HIRING: &str =
    "Forbidden: You do not have sufficient permissions within this company.";
pub const NOT_REVIEWER: &str = NOT_HIRING;

/// The authenticated caller of a use case
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
}

impl Actor {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }

    pub fn is_mega_admin(&self) -> bool {
        self.role.is_mega_admin()
    }
}

pub struct AccessPolicy {
    companies: Arc<dyn CompanyRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl AccessPolicy {
    pub fn new(companies: Arc<dyn CompanyRepository>, jobs: Arc<dyn JobRepository>) -> Self {
        Self { companies, jobs }
    }

    pub async fn membership(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<Option<CompanyMember>> {
        Ok(self.companies.find_member(company_id, actor.user_id).await?)
    }

    pub async fn load_company(&self, company_id: CompanyId) -> ApplicationResult<Company> {
        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Company not found."))
    }

    pub async fn load_job(&self, job_id: JobId) -> ApplicationResult<Job> {
        self.jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Job not found."))
    }

    /// Any membership in the company
    pub async fn require_member(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<()> {
        if actor.is_mega_admin() || self.membership(actor, company_id).await?.is_some() {
            return Ok(());
        }
        Err(self.deny(actor, company_id, NOT_A_MEMBER))
    }

    /// Membership with one of `roles`
    pub async fn require_company_role(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        roles: &[CompanyMemberRole],
        message: &str,
    ) -> ApplicationResult<()> {
        if actor.is_mega_admin() {
            return Ok(());
        }
        match self.membership(actor, company_id).await? {
            Some(member) if roles.contains(&member.role) => Ok(()),
            _ => Err(self.deny(actor, company_id, message)),
        }
    }

    pub async fn require_recruiting_admin(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<()> {
        self.require_company_role(
            actor,
            company_id,
            CompanyMemberRole::ADMINS,
            NOT_RECRUITING_ADMIN,
        )
        .await
    }

    /// Recruiting admins and hiring managers
    pub async fn require_hiring_access(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<()> {
        self.require_company_role(actor, company_id, CompanyMemberRole::HIRING, NOT_HIRING)
            .await
    }

    /// Recruiting admins, hiring managers and reviewers
    pub async fn require_review_access(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<()> {
        self.require_company_role(actor, company_id, CompanyMemberRole::REVIEWERS, NOT_REVIEWER)
            .await
    }

    /// Company administration: the owner, recruiting admins and mega admins
    pub async fn require_company_admin(
        &self,
        actor: &Actor,
        company: &Company,
    ) -> ApplicationResult<()> {
        if company.owner_id == actor.user_id {
            return Ok(());
        }
        self.require_recruiting_admin(actor, company.id).await
    }

    pub async fn is_on_hiring_team(&self, actor: &Actor, job_id: JobId) -> ApplicationResult<bool> {
        Ok(self
            .jobs
            .find_hiring_member(job_id, actor.user_id)
            .await?
            .is_some())
    }

    /// Hiring team members, recruiting admins of the job's company and mega admins
    pub async fn can_rate(&self, actor: &Actor, job: &Job) -> ApplicationResult<bool> {
        if actor.is_mega_admin() || self.is_on_hiring_team(actor, job.id).await? {
            return Ok(true);
        }
        Ok(matches!(
            self.membership(actor, job.company_id).await?,
            Some(m) if m.role == CompanyMemberRole::RecruitingAdmin
        ))
    }

    fn deny(&self, actor: &Actor, company_id: CompanyId, message: &str) -> ApplicationError {
        warn!(user_id = %actor.user_id, company_id = %company_id, "access denied");
        ApplicationError::forbidden(message)
    }
}
