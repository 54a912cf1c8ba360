use megahr_domain::{
    entities::{EmploymentType, Job, JobFilter, JobHiringMember, JobStatus, WorkType},
    errors::FieldViolation,
    roles::CompanyMemberRole,
    value_objects::{DepartmentId, LocationId, UserId},
};
use serde::{Deserialize, Serialize};

use super::validate::{Validate, Violations};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringTeamInput {
    pub user_id: UserId,
    pub role: CompanyMemberRole,
    #[serde(default)]
    pub is_external_recruiter: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobCommand {
    pub title: String,
    pub description: String,
    pub employment_type: EmploymentType,
    pub work_type: WorkType,
    pub status: Option<JobStatus>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub currency: Option<String>,
    pub pay_period: Option<String>,
    pub display_salary: Option<bool>,
    pub job_code: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub location_id: Option<LocationId>,
    pub min_years_experience: Option<u32>,
    #[serde(default)]
    pub hiring_team: Vec<HiringTeamInput>,
}

impl Validate for CreateJobCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.length("title", &self.title, 1, 200)
            .required("description", &self.description);
        salary_violations(&mut v, self.salary_min, self.salary_max);
        v.into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub work_type: Option<WorkType>,
    pub status: Option<JobStatus>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub currency: Option<String>,
    pub pay_period: Option<String>,
    pub display_salary: Option<bool>,
    pub job_code: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub location_id: Option<LocationId>,
    pub min_years_experience: Option<u32>,
}

impl Validate for UpdateJobCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(title) = &self.title {
            v.length("title", title, 1, 200);
        }
        if let Some(description) = &self.description {
            v.required("description", description);
        }
        salary_violations(&mut v, self.salary_min, self.salary_max);
        v.into_vec()
    }
}

fn salary_violations(v: &mut Violations, min: Option<f64>, max: Option<f64>) {
    v.check(min.map_or(true, |m| m >= 0.0), "salaryMin", "salaryMin must not be negative")
        .check(max.map_or(true, |m| m >= 0.0), "salaryMax", "salaryMax must not be negative");
    if let (Some(min), Some(max)) = (min, max) {
        v.check(
            min <= max,
            "salaryMin",
            "salaryMin must be less than or equal to salaryMax",
        );
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
    pub department_id: Option<DepartmentId>,
    pub location_id: Option<LocationId>,
    pub search: Option<String>,
}

impl From<JobListQuery> for JobFilter {
    fn from(query: JobListQuery) -> Self {
        JobFilter {
            status: query.status,
            department_id: query.department_id,
            location_id: query.location_id,
            search: query.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    #[serde(flatten)]
    pub job: Job,
    pub hiring_team: Vec<JobHiringMember>,
}
