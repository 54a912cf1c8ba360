//! Meeting templates, meetings and attendee responses

use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{
        AttendeeStatus, Job, Meeting, MeetingAttendee, MeetingStatus, MeetingTemplate,
        NotificationType,
    },
    repositories::{ApplicationRepository, SchedulingRepository, UserRepository},
    value_objects::{
        normalize_email, CompanyId, MeetingId, MeetingTemplateId, Page, PageRequest,
    },
};
use tracing::info;

use super::{NotificationService, Repositories};
use crate::access::{AccessPolicy, Actor};
use crate::dto::{MeetingTemplateCommand, RsvpCommand, ScheduleMeetingCommand};
use crate::errors::{ApplicationError, ApplicationResult};

pub const NO_MEETING_ACCESS: &str = "Forbidden: You do not have access to this meeting.";

pub struct SchedulingService {
    scheduling: Arc<dyn SchedulingRepository>,
    applications: Arc<dyn ApplicationRepository>,
    users: Arc<dyn UserRepository>,
    policy: Arc<AccessPolicy>,
    notifications: NotificationService,
}

impl SchedulingService {
    pub fn new(
        repos: &Repositories,
        policy: Arc<AccessPolicy>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            scheduling: repos.scheduling.clone(),
            applications: repos.applications.clone(),
            users: repos.users.clone(),
            policy,
            notifications,
        }
    }

    // Templates

    pub async fn create_template(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        cmd: MeetingTemplateCommand,
    ) -> ApplicationResult<MeetingTemplate> {
        self.policy.load_company(company_id).await?;
        self.policy.require_hiring_access(actor, company_id).await?;
        let now = Utc::now();
        let template = MeetingTemplate {
            id: MeetingTemplateId::new(),
            company_id,
            name: cmd.name.trim().to_string(),
            title: cmd.title.trim().to_string(),
            duration_minutes: cmd.duration_minutes.clamp(1, i64::from(u32::MAX)) as u32,
            meeting_type: cmd.meeting_type,
            description: cmd.description,
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
        };
        self.scheduling.insert_template(&template).await?;
        Ok(template)
    }

    pub async fn list_templates(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<Vec<MeetingTemplate>> {
        self.policy.require_review_access(actor, company_id).await?;
        Ok(self.scheduling.list_templates(company_id).await?)
    }

    pub async fn update_template(
        &self,
        actor: &Actor,
        id: MeetingTemplateId,
        cmd: MeetingTemplateCommand,
    ) -> ApplicationResult<MeetingTemplate> {
        let mut template = self.load_template(id).await?;
        self.policy
            .require_hiring_access(actor, template.company_id)
            .await?;
        template.name = cmd.name.trim().to_string();
        template.title = cmd.title.trim().to_string();
        template.duration_minutes = cmd.duration_minutes.clamp(1, i64::from(u32::MAX)) as u32;
        template.meeting_type = cmd.meeting_type;
        template.description = cmd.description;
        template.updated_at = Utc::now();
        self.scheduling.update_template(&template).await?;
        Ok(template)
    }

    pub async fn delete_template(
        &self,
        actor: &Actor,
        id: MeetingTemplateId,
    ) -> ApplicationResult<()> {
        let template = self.load_template(id).await?;
        self.policy
            .require_hiring_access(actor, template.company_id)
            .await?;
        Ok(self.scheduling.delete_template(id).await?)
    }

    // Meetings

    /// Schedule a meeting about a job or application; the organizer attends by default
    pub async fn schedule(
        &self,
        actor: &Actor,
        cmd: ScheduleMeetingCommand,
    ) -> ApplicationResult<Meeting> {
        let job = self.resolve_job(&cmd).await?;
        self.policy.require_hiring_access(actor, job.company_id).await?;
        Meeting::check_window(cmd.start_time, cmd.end_time)?;

        let mut attendees = vec![MeetingAttendee {
            email: normalize_email(&actor.email),
            name: None,
            user_id: Some(actor.user_id),
            is_candidate: false,
            status: AttendeeStatus::Accepted,
        }];
        for input in cmd.attendees {
            let email = normalize_email(&input.email);
            if attendees.iter().any(|a| a.email == email) {
                continue;
            }
            let user_id = match input.user_id {
                Some(id) => Some(id),
                None => self.users.find_by_email(&email).await?.map(|u| u.id),
            };
            attendees.push(MeetingAttendee {
                email,
                name: input.name,
                user_id,
                is_candidate: input.is_candidate,
                status: AttendeeStatus::Pending,
            });
        }

        let now = Utc::now();
        let meeting = Meeting {
            id: MeetingId::new(),
            company_id: job.company_id,
            organizer_id: actor.user_id,
            title: cmd.title.trim().to_string(),
            description: cmd.description,
            start_time: cmd.start_time,
            end_time: cmd.end_time,
            meeting_type: cmd.meeting_type,
            location: cmd.location,
            video_link: cmd.video_link,
            job_id: Some(job.id),
            application_id: cmd.application_id,
            status: MeetingStatus::Scheduled,
            attendees,
            created_at: now,
            updated_at: now,
        };
        self.scheduling.insert_meeting(&meeting).await?;
        info!(meeting_id = %meeting.id, attendees = meeting.attendees.len(), "meeting scheduled");

        self.notifications
            .notify(
                meeting
                    .attendees
                    .iter()
                    .filter_map(|a| a.user_id)
                    .filter(|id| *id != actor.user_id),
                NotificationType::InterviewScheduled,
                &format!(
                    "You have been invited to \"{}\" on {}",
                    meeting.title,
                    meeting.start_time.format("%Y-%m-%d %H:%M UTC")
                ),
                Some(format!("/scheduling/meetings/{}", meeting.id)),
            )
            .await;
        Ok(meeting)
    }

    pub async fn get(&self, actor: &Actor, id: MeetingId) -> ApplicationResult<Meeting> {
        let meeting = self.load_meeting(id).await?;
        if meeting.involves(actor.user_id, &actor.email) {
            return Ok(meeting);
        }
        self.policy
            .require_review_access(actor, meeting.company_id)
            .await
            .map_err(|_| ApplicationError::forbidden(NO_MEETING_ACCESS))?;
        Ok(meeting)
    }

    /// The caller's meetings by start time; `upcoming` keeps future or past ones only
    pub async fn my_meetings(
        &self,
        actor: &Actor,
        upcoming: Option<bool>,
        page: PageRequest,
    ) -> ApplicationResult<Page<Meeting>> {
        let now = Utc::now();
        let meetings: Vec<Meeting> = self
            .scheduling
            .list_meetings_for_user(actor.user_id, &actor.email)
            .await?
            .into_iter()
            .filter(|m| match upcoming {
                Some(true) => m.start_time >= now,
                Some(false) => m.start_time < now,
                None => true,
            })
            .collect();
        Ok(page.apply(meetings))
    }

    pub async fn rsvp(
        &self,
        actor: &Actor,
        id: MeetingId,
        cmd: RsvpCommand,
    ) -> ApplicationResult<Meeting> {
        let mut meeting = self.load_meeting(id).await?;
        let index = meeting
            .attendee_index(actor.user_id, &actor.email)
            .ok_or_else(|| {
                ApplicationError::forbidden("Forbidden: You are not an attendee of this meeting.")
            })?;
        if meeting.status == MeetingStatus::Cancelled {
            return Err(ApplicationError::bad_request("This meeting has been cancelled."));
        }
        meeting.attendees[index].status = cmd.status;
        meeting.attendees[index].user_id.get_or_insert(actor.user_id);
        meeting.updated_at = Utc::now();
        self.scheduling.update_meeting(&meeting).await?;
        info!(meeting_id = %id, user_id = %actor.user_id, status = ?cmd.status, "rsvp recorded");
        Ok(meeting)
    }

    /// Cancel a meeting; organizer or recruiting admin of the company
    pub async fn cancel(&self, actor: &Actor, id: MeetingId) -> ApplicationResult<Meeting> {
        let mut meeting = self.load_meeting(id).await?;
        if meeting.organizer_id != actor.user_id {
            self.policy
                .require_recruiting_admin(actor, meeting.company_id)
                .await?;
        }
        meeting.status = MeetingStatus::Cancelled;
        meeting.updated_at = Utc::now();
        self.scheduling.update_meeting(&meeting).await?;
        info!(meeting_id = %id, "meeting cancelled");
        Ok(meeting)
    }

    /// The job a meeting is about, via its application when one is given
    async fn resolve_job(&self, cmd: &ScheduleMeetingCommand) -> ApplicationResult<Job> {
        let job_id = match (cmd.application_id, cmd.job_id) {
            (Some(application_id), job_id) => {
                let application = self
                    .applications
                    .find_by_id(application_id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("Application not found."))?;
                if job_id.is_some_and(|id| id != application.job_id) {
                    return Err(ApplicationError::bad_request(
                        "The application does not belong to the given job.",
                    ));
                }
                application.job_id
            }
            (None, Some(job_id)) => job_id,
            (None, None) => {
                return Err(ApplicationError::validation(
                    "jobId",
                    "Either jobId or applicationId is required",
                ))
            }
        };
        self.policy.load_job(job_id).await
    }

    async fn load_template(&self, id: MeetingTemplateId) -> ApplicationResult<MeetingTemplate> {
        self.scheduling
            .find_template(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Meeting template not found."))
    }

    async fn load_meeting(&self, id: MeetingId) -> ApplicationResult<Meeting> {
        self.scheduling
            .find_meeting(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Meeting not found."))
    }
}
