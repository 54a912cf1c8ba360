//! Application message threads and company message templates

use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{
        Application, CommentVisibility, Job, Message, MessageTemplate, NotificationType,
    },
    repositories::{
        ApplicationRepository, CandidateRepository, JobRepository, MessagingRepository,
    },
    roles::CompanyMemberRole,
    value_objects::{
        normalize_email, ApplicationId, CompanyId, MessageId, MessageTemplateId, Page,
        PageRequest,
    },
};
use tracing::{info, warn};

use super::{NotificationService, Repositories};
use crate::access::{AccessPolicy, Actor};
use crate::dto::{
    MessageTemplateCommand, MessageTemplatesGrouped, PostMessageCommand,
    UpdateMessageTemplateCommand,
};
use crate::errors::{ApplicationError, ApplicationResult};

pub const NO_THREAD_ACCESS: &str =
    "Forbidden: You do not have access to this application's messages.";

/// How much of a thread the caller may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Viewer {
    Admin,
    HiringManager,
    TeamMember,
    Candidate,
}

impl Viewer {
    fn can_see(self, message: &Message) -> bool {
        if !message.is_internal_note {
            return true;
        }
        match self {
            Viewer::Admin => true,
            Viewer::HiringManager => matches!(
                message.visibility,
                Some(CommentVisibility::Public | CommentVisibility::Private)
            ),
            Viewer::TeamMember => message.visibility == Some(CommentVisibility::Public),
            Viewer::Candidate => false,
        }
    }
}

pub struct MessagingService {
    messaging: Arc<dyn MessagingRepository>,
    applications: Arc<dyn ApplicationRepository>,
    candidates: Arc<dyn CandidateRepository>,
    jobs: Arc<dyn JobRepository>,
    policy: Arc<AccessPolicy>,
    notifications: NotificationService,
}

impl MessagingService {
    pub fn new(
        repos: &Repositories,
        policy: Arc<AccessPolicy>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            messaging: repos.messaging.clone(),
            applications: repos.applications.clone(),
            candidates: repos.candidates.clone(),
            jobs: repos.jobs.clone(),
            policy,
            notifications,
        }
    }

    /// One page of the visible messages, oldest first within the page
    pub async fn list_messages(
        &self,
        actor: &Actor,
        application_id: ApplicationId,
        page: PageRequest,
    ) -> ApplicationResult<Page<Message>> {
        let (_, _, viewer) = self.resolve_viewer(actor, application_id).await?;
        let thread = self.messaging.thread_for_application(application_id).await?;
        let visible: Vec<Message> = self
            .messaging
            .list_messages(thread.id)
            .await?
            .into_iter()
            .filter(|m| viewer.can_see(m))
            .collect();
        let mut page = page.apply(visible);
        page.items.reverse();
        Ok(page)
    }

    pub async fn post_message(
        &self,
        actor: &Actor,
        application_id: ApplicationId,
        cmd: PostMessageCommand,
    ) -> ApplicationResult<Message> {
        let (_, job, viewer) = self.resolve_viewer(actor, application_id).await?;
        if cmd.is_internal_note {
            if viewer == Viewer::Candidate {
                return Err(ApplicationError::forbidden(
                    "Forbidden: Candidates cannot post internal notes.",
                ));
            }
            if cmd.visibility.is_none() {
                return Err(ApplicationError::validation(
                    "visibility",
                    "Visibility is required for internal notes",
                ));
            }
        }

        let thread = self.messaging.thread_for_application(application_id).await?;
        let message = Message {
            id: MessageId::new(),
            thread_id: thread.id,
            sender_id: actor.user_id,
            content: cmd.content.trim().to_string(),
            is_internal_note: cmd.is_internal_note,
            visibility: cmd.visibility.filter(|_| cmd.is_internal_note),
            sent_at: Utc::now(),
        };
        self.messaging.insert_message(&message).await?;
        info!(
            message_id = %message.id,
            application_id = %application_id,
            internal = message.is_internal_note,
            "message posted"
        );

        let team = self.jobs.list_hiring_team(job.id).await?;
        self.notifications
            .notify(
                team.iter().map(|m| m.user_id).filter(|id| *id != actor.user_id),
                NotificationType::NewMessage,
                &format!("New message on an application for {}", job.title),
                Some(format!("/applications/{application_id}/messages")),
            )
            .await;
        Ok(message)
    }

    async fn resolve_viewer(
        &self,
        actor: &Actor,
        application_id: ApplicationId,
    ) -> ApplicationResult<(Application, Job, Viewer)> {
        let application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Application not found."))?;
        let job = self.policy.load_job(application.job_id).await?;

        if actor.is_mega_admin() {
            return Ok((application, job, Viewer::Admin));
        }
        let membership = self.policy.membership(actor, job.company_id).await?;
        if membership.is_some_and(|m| m.role == CompanyMemberRole::RecruitingAdmin) {
            return Ok((application, job, Viewer::Admin));
        }
        if let Some(member) = self.jobs.find_hiring_member(job.id, actor.user_id).await? {
            let viewer = match member.role {
                CompanyMemberRole::RecruitingAdmin => Viewer::Admin,
                CompanyMemberRole::HiringManager => Viewer::HiringManager,
                _ => Viewer::TeamMember,
            };
            return Ok((application, job, viewer));
        }
        let is_candidate = self
            .candidates
            .find_by_id(application.candidate_id)
            .await?
            .is_some_and(|c| c.email == normalize_email(&actor.email));
        if is_candidate {
            return Ok((application, job, Viewer::Candidate));
        }

        warn!(
            user_id = %actor.user_id,
            application_id = %application_id,
            "message thread access denied"
        );
        Err(ApplicationError::forbidden(NO_THREAD_ACCESS))
    }

    // Templates

    pub async fn list_templates(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<MessageTemplatesGrouped> {
        self.policy.load_company(company_id).await?;
        self.policy.require_member(actor, company_id).await?;
        let (required, custom): (Vec<_>, Vec<_>) = self
            .messaging
            .list_templates(company_id)
            .await?
            .into_iter()
            .partition(|t| t.is_required);
        Ok(MessageTemplatesGrouped { required, custom })
    }

    pub async fn create_template(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        cmd: MessageTemplateCommand,
    ) -> ApplicationResult<MessageTemplate> {
        self.policy.load_company(company_id).await?;
        self.policy.require_recruiting_admin(actor, company_id).await?;
        let now = Utc::now();
        let template = MessageTemplate {
            id: MessageTemplateId::new(),
            company_id,
            name: cmd.name.trim().to_string(),
            subject: cmd.subject.trim().to_string(),
            body: cmd.body,
            category: cmd.category,
            is_required: false,
            created_by: Some(actor.user_id),
            created_at: now,
            updated_at: now,
        };
        self.messaging.insert_template(&template).await?;
        Ok(template)
    }

    pub async fn update_template(
        &self,
        actor: &Actor,
        id: MessageTemplateId,
        cmd: UpdateMessageTemplateCommand,
    ) -> ApplicationResult<MessageTemplate> {
        let mut template = self.load_template(id).await?;
        self.policy
            .require_recruiting_admin(actor, template.company_id)
            .await?;
        if let Some(name) = cmd.name {
            template.name = name.trim().to_string();
        }
        if let Some(subject) = cmd.subject {
            template.subject = subject.trim().to_string();
        }
        if let Some(body) = cmd.body {
            template.body = body;
        }
        if cmd.category.is_some() {
            template.category = cmd.category;
        }
        template.updated_at = Utc::now();
        self.messaging.update_template(&template).await?;
        Ok(template)
    }

    /// Delete a custom template; required ones can only be edited
    pub async fn delete_template(
        &self,
        actor: &Actor,
        id: MessageTemplateId,
    ) -> ApplicationResult<()> {
        let template = self.load_template(id).await?;
        self.policy
            .require_recruiting_admin(actor, template.company_id)
            .await?;
        if template.is_required {
            return Err(ApplicationError::forbidden(
                "Forbidden: Required templates cannot be deleted.",
            ));
        }
        Ok(self.messaging.delete_template(id).await?)
    }

    async fn load_template(&self, id: MessageTemplateId) -> ApplicationResult<MessageTemplate> {
        self.messaging
            .find_template(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Message template not found."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use megahr_domain::value_objects::{MessageThreadId, UserId};

    fn note(visibility: Option<CommentVisibility>) -> Message {
        Message {
            id: MessageId::new(),
            thread_id: MessageThreadId::new(),
            sender_id: UserId::new(),
            content: "note".into(),
            is_internal_note: visibility.is_some(),
            visibility,
            sent_at: Utc::now(),
        }
    }

    #[test]
    fn visibility_narrows_down_the_hierarchy() {
        let admin_only = note(Some(CommentVisibility::AdminOnly));
        let private = note(Some(CommentVisibility::Private));
        let public = note(Some(CommentVisibility::Public));
        let plain = note(None);

        assert!(Viewer::Admin.can_see(&admin_only));
        assert!(!Viewer::HiringManager.can_see(&admin_only));
        assert!(Viewer::HiringManager.can_see(&private));
        assert!(!Viewer::TeamMember.can_see(&private));
        assert!(Viewer::TeamMember.can_see(&public));
        assert!(!Viewer::Candidate.can_see(&public));
        assert!(Viewer::Candidate.can_see(&plain));
    }
}
