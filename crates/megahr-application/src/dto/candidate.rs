use megahr_domain::{
    entities::{Application, ApplicationStatus, Candidate},
    errors::FieldViolation,
    value_objects::JobId,
};
use serde::{Deserialize, Serialize};

use super::validate::{Validate, Violations};

/// A résumé received with a candidate submission
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Built from a multipart form by the HTTP layer
#[derive(Debug, Clone, Default)]
pub struct CreateCandidateCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub job_id: String,
    pub comment: Option<String>,
    pub resume: Option<ResumeUpload>,
}

impl Validate for CreateCandidateCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .length("firstName", &self.first_name, 1, 100)
            .length("lastName", &self.last_name, 1, 100)
            .email("email", &self.email)
            .check(
                JobId::parse(&self.job_id).is_ok(),
                "jobId",
                "jobId must be a valid UUID",
            )
            .into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidateCommand {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub comment: Option<String>,
}

impl Validate for UpdateCandidateCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(name) = &self.first_name {
            v.length("firstName", name, 1, 100);
        }
        if let Some(name) = &self.last_name {
            v.length("lastName", name, 1, 100);
        }
        if let Some(email) = &self.email {
            v.email("email", email);
        }
        v.into_vec()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateWithApplications {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetails {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub applications: Vec<Application>,
    pub resume_content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationStatusCommand {
    pub status: ApplicationStatus,
}
