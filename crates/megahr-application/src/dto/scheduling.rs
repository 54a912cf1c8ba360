use chrono::{DateTime, Utc};
use megahr_domain::{
    entities::{AttendeeStatus, MeetingTemplate, MeetingType},
    errors::FieldViolation,
    value_objects::{ApplicationId, JobId, UserId},
};
use serde::Deserialize;

use super::validate::{Validate, Violations};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingTemplateCommand {
    pub name: String,
    pub title: String,
    pub duration_minutes: i64,
    pub meeting_type: MeetingType,
    pub description: Option<String>,
}

impl Validate for MeetingTemplateCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .length("name", &self.name, 1, 100)
            .length("title", &self.title, 1, 200)
            .range(
                "durationMinutes",
                self.duration_minutes,
                1,
                MeetingTemplate::MAX_DURATION_MINUTES as i64,
            )
            .into_vec()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeInput {
    pub email: String,
    pub name: Option<String>,
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub is_candidate: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMeetingCommand {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub meeting_type: MeetingType,
    pub location: Option<String>,
    pub video_link: Option<String>,
    pub job_id: Option<JobId>,
    pub application_id: Option<ApplicationId>,
    #[serde(default)]
    pub attendees: Vec<AttendeeInput>,
}

impl Validate for ScheduleMeetingCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.length("title", &self.title, 1, 200)
            .check(
                self.job_id.is_some() || self.application_id.is_some(),
                "jobId",
                "Either jobId or applicationId is required",
            )
            .check(
                self.start_time < self.end_time,
                "endTime",
                "Start time must be before end time",
            );
        for (i, attendee) in self.attendees.iter().enumerate() {
            v.email(&format!("attendees.{i}.email"), &attendee.email);
        }
        v.into_vec()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpCommand {
    pub status: AttendeeStatus,
}

impl Validate for RsvpCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .check(
                self.status != AttendeeStatus::Pending,
                "status",
                "Status must be ACCEPTED, DECLINED or TENTATIVE",
            )
            .into_vec()
    }
}
