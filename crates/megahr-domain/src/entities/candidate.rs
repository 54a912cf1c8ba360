use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ApplicationId, CandidateId, JobId, JobWorkflowStageId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub resume_url: Option<String>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    Active,
    Hired,
    Rejected,
    Withdrawn,
}

/// A candidate's application to a job, positioned at a stage of the job's workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub current_stage_id: Option<JobWorkflowStageId>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn new(
        candidate_id: CandidateId,
        job_id: JobId,
        current_stage_id: Option<JobWorkflowStageId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ApplicationId::new(),
            candidate_id,
            job_id,
            status: ApplicationStatus::Active,
            current_stage_id,
            applied_at: now,
            updated_at: now,
        }
    }
}
