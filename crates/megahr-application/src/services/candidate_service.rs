//! Candidates, their résumés and applications

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{Application, Candidate, NotificationType},
    errors::DomainError,
    repositories::{
        ApplicationRepository, CandidateRepository, JobRepository, WorkflowRepository,
    },
    value_objects::{normalize_email, ApplicationId, CandidateId, CompanyId, JobId},
};
use tracing::{info, warn};

use super::{NotificationService, Repositories};
use crate::access::{AccessPolicy, Actor, NOT_HIRING};
use crate::dto::{
    CandidateDetails, CandidateWithApplications, CreateCandidateCommand,
    UpdateApplicationStatusCommand, UpdateCandidateCommand,
};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::ports::{ResumeStore, StoredFile};

pub const CV_NOT_FOUND: &str = "CV not found.";

pub struct CandidateService {
    candidates: Arc<dyn CandidateRepository>,
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobRepository>,
    workflows: Arc<dyn WorkflowRepository>,
    policy: Arc<AccessPolicy>,
    notifications: NotificationService,
    resumes: Arc<dyn ResumeStore>,
}

impl CandidateService {
    pub fn new(
        repos: &Repositories,
        policy: Arc<AccessPolicy>,
        notifications: NotificationService,
        resumes: Arc<dyn ResumeStore>,
    ) -> Self {
        Self {
            candidates: repos.candidates.clone(),
            applications: repos.applications.clone(),
            jobs: repos.jobs.clone(),
            workflows: repos.workflows.clone(),
            policy,
            notifications,
            resumes,
        }
    }

    /// Register a candidate against a job, storing their résumé and opening an application
    pub async fn create(
        &self,
        actor: &Actor,
        cmd: CreateCandidateCommand,
    ) -> ApplicationResult<CandidateWithApplications> {
        let job_id = JobId::parse(&cmd.job_id)?;
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_hiring_access(actor, job.company_id).await?;

        let email = normalize_email(&cmd.email);
        if self.candidates.find_by_email(&email).await?.is_some() {
            return Err(DomainError::unique("Candidate", "email").into());
        }

        let resume_url = match cmd.resume {
            Some(upload) if !upload.bytes.is_empty() => {
                Some(self.resumes.save(&upload.file_name, upload.bytes).await?)
            }
            _ => None,
        };

        let first_stage = self
            .workflows
            .find_job_workflow(job_id)
            .await?
            .and_then(|w| w.first_stage().map(|s| s.id));

        let now = Utc::now();
        let candidate = Candidate {
            id: CandidateId::new(),
            first_name: cmd.first_name.trim().to_string(),
            last_name: cmd.last_name.trim().to_string(),
            email,
            phone_number: cmd.phone_number.filter(|p| !p.trim().is_empty()),
            resume_url,
            comment: cmd.comment.filter(|c| !c.trim().is_empty()),
            created_at: now,
            updated_at: now,
        };
        let application = Application::new(candidate.id, job_id, first_stage);

        if let Err(err) = self.candidates.insert(&candidate, &application).await {
            self.discard_resume(candidate.resume_url.as_deref()).await;
            return Err(err.into());
        }
        info!(candidate_id = %candidate.id, job_id = %job_id, "candidate created");

        let team = self.jobs.list_hiring_team(job_id).await?;
        self.notifications
            .notify(
                team.iter().map(|m| m.user_id),
                NotificationType::NewCandidate,
                &format!("New candidate {} applied for {}", candidate.full_name(), job.title),
                Some(format!("/candidates/{}", candidate.id)),
            )
            .await;

        Ok(CandidateWithApplications {
            candidate,
            applications: vec![application],
        })
    }

    pub async fn list_for_company(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<Vec<CandidateWithApplications>> {
        self.policy.require_hiring_access(actor, company_id).await?;
        Ok(self
            .candidates
            .list_for_company(company_id)
            .await?
            .into_iter()
            .map(|(candidate, applications)| CandidateWithApplications {
                candidate,
                applications,
            })
            .collect())
    }

    pub async fn get(&self, actor: &Actor, id: CandidateId) -> ApplicationResult<CandidateDetails> {
        let (candidate, applications) = self.load_accessible(actor, id).await?;
        let resume_content = match candidate.resume_url.as_deref() {
            Some(url) => Some(self.resume_preview(url).await?),
            None => None,
        };
        Ok(CandidateDetails {
            candidate,
            applications,
            resume_content,
        })
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: CandidateId,
        cmd: UpdateCandidateCommand,
    ) -> ApplicationResult<Candidate> {
        let (mut candidate, _) = self.load_accessible(actor, id).await?;
        if let Some(first) = cmd.first_name {
            candidate.first_name = first.trim().to_string();
        }
        if let Some(last) = cmd.last_name {
            candidate.last_name = last.trim().to_string();
        }
        if let Some(email) = cmd.email {
            candidate.email = normalize_email(&email);
        }
        if cmd.phone_number.is_some() {
            candidate.phone_number = cmd.phone_number;
        }
        if cmd.comment.is_some() {
            candidate.comment = cmd.comment;
        }
        candidate.updated_at = Utc::now();
        self.candidates.update(&candidate).await?;
        Ok(candidate)
    }

    /// Delete a candidate with everything attached to them, résumé file included
    pub async fn delete(&self, actor: &Actor, id: CandidateId) -> ApplicationResult<()> {
        let (candidate, _) = self.load_accessible(actor, id).await?;
        self.candidates.delete(id).await?;
        self.discard_resume(candidate.resume_url.as_deref()).await;
        info!(candidate_id = %id, "candidate deleted");
        Ok(())
    }

    pub async fn download_cv(
        &self,
        actor: &Actor,
        id: CandidateId,
    ) -> ApplicationResult<StoredFile> {
        let (candidate, _) = self.load_accessible(actor, id).await?;
        let url = candidate
            .resume_url
            .ok_or_else(|| ApplicationError::not_found(CV_NOT_FOUND))?;
        self.resumes
            .read(&url)
            .await?
            .ok_or_else(|| ApplicationError::not_found(CV_NOT_FOUND))
    }

    pub async fn get_application(
        &self,
        actor: &Actor,
        id: ApplicationId,
    ) -> ApplicationResult<Application> {
        let application = self.load_application(id).await?;
        let job = self.policy.load_job(application.job_id).await?;
        self.policy.require_review_access(actor, job.company_id).await?;
        Ok(application)
    }

    pub async fn update_application_status(
        &self,
        actor: &Actor,
        id: ApplicationId,
        cmd: UpdateApplicationStatusCommand,
    ) -> ApplicationResult<Application> {
        let mut application = self.load_application(id).await?;
        let job = self.policy.load_job(application.job_id).await?;
        self.policy.require_hiring_access(actor, job.company_id).await?;

        application.status = cmd.status;
        application.updated_at = Utc::now();
        self.applications.update(&application).await?;
        info!(application_id = %id, status = ?cmd.status, "application status changed");
        Ok(application)
    }

    async fn load_application(&self, id: ApplicationId) -> ApplicationResult<Application> {
        self.applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Application not found."))
    }

    /// The candidate and their applications, if the caller hires for any of those jobs
    async fn load_accessible(
        &self,
        actor: &Actor,
        id: CandidateId,
    ) -> ApplicationResult<(Candidate, Vec<Application>)> {
        let candidate = self
            .candidates
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Candidate not found."))?;
        let applications = self.applications.list_by_candidate(id).await?;
        if actor.is_mega_admin() {
            return Ok((candidate, applications));
        }
        for application in &applications {
            let Some(job) = self.jobs.find_by_id(application.job_id).await? else {
                continue;
            };
            if self
                .policy
                .require_hiring_access(actor, job.company_id)
                .await
                .is_ok()
            {
                return Ok((candidate, applications));
            }
        }
        Err(ApplicationError::forbidden(NOT_HIRING))
    }

    async fn resume_preview(&self, url: &str) -> ApplicationResult<String> {
        let extension = Path::new(url)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if extension != "txt" {
            return Ok(format!(
                "Preview is not available for .{extension} files. Download the CV to view it."
            ));
        }
        Ok(match self.resumes.read(url).await? {
            Some(file) => String::from_utf8_lossy(&file.bytes).into_owned(),
            None => "The CV file could not be found.".to_string(),
        })
    }

    async fn discard_resume(&self, url: Option<&str>) {
        if let Some(url) = url {
            if let Err(err) = self.resumes.remove(url).await {
                warn!(error = %err, url, "failed to remove resume file");
            }
        }
    }
}
