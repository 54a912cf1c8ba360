use chrono::{DateTime, Utc};
use megahr_domain::{
    entities::{CareersPageSettings, Company, EmploymentType, Job, WorkType},
    errors::FieldViolation,
    value_objects::{CompanyId, DepartmentId, JobId, LocationId},
};
use serde::{Deserialize, Serialize};

use super::validate::{Validate, Violations};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCareersPageCommand {
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub focus_color: Option<String>,
    pub hyperlink_color: Option<String>,
    pub google_analytics_id: Option<String>,
    pub tracking_pixel_url: Option<String>,
    pub custom_css: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

fn is_hex_color(value: &str) -> bool {
    let digits = value.strip_prefix('#').unwrap_or("");
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

impl Validate for UpdateCareersPageCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        for (path, color) in [
            ("primaryColor", &self.primary_color),
            ("focusColor", &self.focus_color),
            ("hyperlinkColor", &self.hyperlink_color),
        ] {
            if let Some(color) = color {
                v.check(is_hex_color(color), path, "Must be a hex color such as #1F2937");
            }
        }
        if let Some(name) = &self.company_name {
            v.length("companyName", name, 1, 200);
        }
        v.into_vec()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareersPageView {
    #[serde(flatten)]
    pub settings: CareersPageSettings,
    pub company_name: String,
    pub company_description: Option<String>,
}

impl CareersPageView {
    pub fn new(settings: CareersPageSettings, company: &Company) -> Self {
        Self {
            settings,
            company_name: company.name.clone(),
            company_description: company.description.clone(),
        }
    }
}

/// A published job as shown to applicants
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicJob {
    pub id: JobId,
    pub company_id: CompanyId,
    pub title: String,
    pub description: String,
    pub employment_type: EmploymentType,
    pub work_type: WorkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_period: Option<String>,
    pub job_code: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub location_id: Option<LocationId>,
    pub min_years_experience: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl From<Job> for PublicJob {
    fn from(job: Job) -> Self {
        let salary = job.display_salary;
        Self {
            id: job.id,
            company_id: job.company_id,
            title: job.title,
            description: job.description,
            employment_type: job.employment_type,
            work_type: job.work_type,
            salary_min: job.salary_min.filter(|_| salary),
            salary_max: job.salary_max.filter(|_| salary),
            currency: job.currency.filter(|_| salary),
            pay_period: job.pay_period.filter(|_| salary),
            job_code: job.job_code,
            department_id: job.department_id,
            location_id: job.location_id,
            min_years_experience: job.min_years_experience,
            created_at: job.created_at,
        }
    }
}
