use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{
    normalize_email, ApplicationId, CompanyId, JobId, MeetingId, MeetingTemplateId, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingType {
    Interview,
    PhoneScreen,
    TeamMeeting,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendeeStatus {
    Pending,
    Accepted,
    Declined,
    Tentative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    Cancelled,
}

/// Reusable meeting preset for a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingTemplate {
    pub id: MeetingTemplateId,
    pub company_id: CompanyId,
    pub name: String,
    pub title: String,
    pub duration_minutes: u32,
    pub meeting_type: MeetingType,
    pub description: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MeetingTemplate {
    pub const MAX_DURATION_MINUTES: u32 = 8 * 60;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingAttendee {
    pub email: String,
    pub name: Option<String>,
    pub user_id: Option<UserId>,
    pub is_candidate: bool,
    pub status: AttendeeStatus,
}

/// Scheduled meeting tied to a job or an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: MeetingId,
    pub company_id: CompanyId,
    pub organizer_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub meeting_type: MeetingType,
    pub location: Option<String>,
    pub video_link: Option<String>,
    pub job_id: Option<JobId>,
    pub application_id: Option<ApplicationId>,
    pub status: MeetingStatus,
    pub attendees: Vec<MeetingAttendee>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    /// Check the time window: start before end, at most eight hours long
    pub fn check_window(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<()> {
        if start >= end {
            return Err(DomainError::validation(
                "endTime",
                "Start time must be before end time",
            ));
        }
        if end - start > Duration::minutes(MeetingTemplate::MAX_DURATION_MINUTES as i64) {
            return Err(DomainError::validation(
                "endTime",
                "Meetings cannot be longer than 8 hours",
            ));
        }
        Ok(())
    }

    /// Whether the user is listed as an attendee, by user id or e-mail
    pub fn attendee_index(&self, user_id: UserId, email: &str) -> Option<usize> {
        let email = normalize_email(email);
        self.attendees
            .iter()
            .position(|a| a.user_id == Some(user_id) || a.email == email)
    }

    pub fn involves(&self, user_id: UserId, email: &str) -> bool {
        self.organizer_id == user_id || self.attendee_index(user_id, email).is_some()
    }
}
