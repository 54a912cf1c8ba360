use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::roles::CompanyMemberRole;
use crate::value_objects::{CompanyId, DepartmentId, JobId, LocationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkType {
    Onsite,
    Remote,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    Draft,
    Published,
    Internal,
    Confidential,
    Closed,
    Archived,
}

/// Job posting owned by a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub company_id: CompanyId,
    pub title: String,
    pub description: String,
    pub employment_type: EmploymentType,
    pub work_type: WorkType,
    pub status: JobStatus,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub currency: Option<String>,
    pub pay_period: Option<String>,
    pub display_salary: bool,
    pub job_code: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub location_id: Option<LocationId>,
    pub min_years_experience: Option<u32>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Salary bounds must be non-negative and ordered
    pub fn check_salary(&self) -> DomainResult<()> {
        for (field, value) in [("salaryMin", self.salary_min), ("salaryMax", self.salary_max)] {
            if matches!(value, Some(v) if v < 0.0) {
                return Err(DomainError::validation(field, "must not be negative"));
            }
        }
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                return Err(DomainError::validation(
                    "salaryMin",
                    "must be less than or equal to salaryMax",
                ));
            }
        }
        Ok(())
    }

    pub fn is_public(&self) -> bool {
        self.status == JobStatus::Published
    }

    /// Case-insensitive match against title and description
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.title.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// Membership of a user in one job's hiring team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHiringMember {
    pub job_id: JobId,
    pub user_id: UserId,
    pub role: CompanyMemberRole,
    pub is_external_recruiter: bool,
    pub added_at: DateTime<Utc>,
}

/// Filters for listing a company's jobs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub department_id: Option<DepartmentId>,
    pub location_id: Option<LocationId>,
    pub search: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        self.status.map_or(true, |s| job.status == s)
            && self.department_id.map_or(true, |d| job.department_id == Some(d))
            && self.location_id.map_or(true, |l| job.location_id == Some(l))
            && self.search.as_deref().map_or(true, |s| job.matches_search(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        let now = Utc::now();
        Job {
            id: JobId::new(),
            company_id: CompanyId::new(),
            title: "Backend Engineer".into(),
            description: "Rust services".into(),
            employment_type: EmploymentType::FullTime,
            work_type: WorkType::Remote,
            status: JobStatus::Published,
            salary_min: Some(100.0),
            salary_max: Some(50.0),
            currency: None,
            pay_period: None,
            display_salary: true,
            job_code: None,
            department_id: None,
            location_id: None,
            min_years_experience: None,
            created_by: UserId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn inverted_salary_range_is_rejected() {
        assert!(job().check_salary().is_err());
    }

    #[test]
    fn filter_matches_search_case_insensitively() {
        let filter = JobFilter {
            search: Some("RUST".into()),
            status: Some(JobStatus::Published),
            ..Default::default()
        };
        assert!(filter.matches(&job()));
        let filter = JobFilter {
            status: Some(JobStatus::Draft),
            ..Default::default()
        };
        assert!(!filter.matches(&job()));
    }
}
