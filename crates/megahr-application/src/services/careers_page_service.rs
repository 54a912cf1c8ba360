//! Public careers site of a company

use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{CareersPageSettings, Company, JobFilter, JobStatus},
    repositories::{CompanyRepository, JobRepository, OrganizationRepository},
    value_objects::{CompanyId, JobId, Page, PageRequest},
};
use tracing::info;

use super::Repositories;
use crate::access::{AccessPolicy, Actor};
use crate::dto::{CareersPageView, JobListQuery, PublicJob, UpdateCareersPageCommand};
use crate::errors::{ApplicationError, ApplicationResult};

pub struct CareersPageService {
    organization: Arc<dyn OrganizationRepository>,
    companies: Arc<dyn CompanyRepository>,
    jobs: Arc<dyn JobRepository>,
    policy: Arc<AccessPolicy>,
}

impl CareersPageService {
    pub fn new(repos: &Repositories, policy: Arc<AccessPolicy>) -> Self {
        Self {
            organization: repos.organization.clone(),
            companies: repos.companies.clone(),
            jobs: repos.jobs.clone(),
            policy,
        }
    }

    pub async fn settings(&self, company_id: CompanyId) -> ApplicationResult<CareersPageView> {
        let company = self.policy.load_company(company_id).await?;
        let settings = self.stored_or_default(&company).await?;
        Ok(CareersPageView::new(settings, &company))
    }

    pub async fn update(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        cmd: UpdateCareersPageCommand,
    ) -> ApplicationResult<CareersPageView> {
        let mut company = self.policy.load_company(company_id).await?;
        self.policy.require_company_admin(actor, &company).await?;

        let mut settings = self.stored_or_default(&company).await?;
        if cmd.logo_url.is_some() {
            settings.logo_url = cmd.logo_url;
        }
        if let Some(color) = cmd.primary_color {
            settings.primary_color = color;
        }
        if let Some(color) = cmd.focus_color {
            settings.focus_color = color;
        }
        if let Some(color) = cmd.hyperlink_color {
            settings.hyperlink_color = color;
        }
        if cmd.google_analytics_id.is_some() {
            settings.google_analytics_id = cmd.google_analytics_id;
        }
        if cmd.tracking_pixel_url.is_some() {
            settings.tracking_pixel_url = cmd.tracking_pixel_url;
        }
        if cmd.custom_css.is_some() {
            settings.custom_css = cmd.custom_css;
        }
        settings.updated_at = Utc::now();
        self.organization.save_careers_page(&settings).await?;

        if cmd.company_name.is_some() || cmd.company_description.is_some() {
            if let Some(name) = cmd.company_name {
                company.name = name.trim().to_string();
            }
            if cmd.company_description.is_some() {
                company.description = cmd.company_description;
            }
            company.updated_at = Utc::now();
            self.companies.update(&company).await?;
        }
        info!(company_id = %company_id, "careers page updated");
        Ok(CareersPageView::new(settings, &company))
    }

    /// Published jobs of a company
    pub async fn public_jobs(
        &self,
        company_id: CompanyId,
        query: JobListQuery,
        page: PageRequest,
    ) -> ApplicationResult<Page<PublicJob>> {
        self.policy.load_company(company_id).await?;
        let filter = JobFilter {
            status: Some(JobStatus::Published),
            ..JobFilter::from(query)
        };
        let jobs = self.jobs.list_by_company(company_id, &filter).await?;
        Ok(page.apply(jobs).map(PublicJob::from))
    }

    pub async fn public_job(&self, job_id: JobId) -> ApplicationResult<PublicJob> {
        self.jobs
            .find_by_id(job_id)
            .await?
            .filter(|job| job.is_public())
            .map(PublicJob::from)
            .ok_or_else(|| ApplicationError::not_found("Job not found."))
    }

    async fn stored_or_default(&self, company: &Company) -> ApplicationResult<CareersPageSettings> {
        match self.organization.careers_page(company.id).await? {
            Some(settings) => Ok(settings),
            None => {
                let settings = CareersPageSettings::defaults(company.id);
                self.organization.save_careers_page(&settings).await?;
                Ok(settings)
            }
        }
    }
}
