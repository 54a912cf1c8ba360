//! Configuration of the AI hiring assistant and its interaction log

use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{
        AiInteractionLog, BusinessPreferences, CommunicationPreferences, JobSchedulingConfig,
        JobScreeningConfig, Meeting, MeetingNoteTakingConfig,
    },
    repositories::{AiAssistantRepository, SchedulingRepository},
    value_objects::{AiInteractionId, CompanyId, JobId, MeetingId, Page, PageRequest},
};
use tracing::info;

use super::Repositories;
use crate::access::{AccessPolicy, Actor};
use crate::dto::{
    BusinessPreferencesCommand, CommunicationPreferencesCommand, LogInteractionCommand,
    NoteTakingCommand, SchedulingConfigCommand, ScreeningConfigCommand,
};
use crate::errors::{ApplicationError, ApplicationResult};

pub struct AiAssistantService {
    assistant: Arc<dyn AiAssistantRepository>,
    scheduling: Arc<dyn SchedulingRepository>,
    policy: Arc<AccessPolicy>,
}

impl AiAssistantService {
    pub fn new(repos: &Repositories, policy: Arc<AccessPolicy>) -> Self {
        Self {
            assistant: repos.ai_assistant.clone(),
            scheduling: repos.scheduling.clone(),
            policy,
        }
    }

    /// Stored preferences, created empty on first read
    pub async fn business_preferences(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<BusinessPreferences> {
        self.policy.load_company(company_id).await?;
        self.policy.require_member(actor, company_id).await?;
        match self.assistant.business_preferences(company_id).await? {
            Some(prefs) => Ok(prefs),
            None => {
                let prefs = BusinessPreferences::empty(company_id);
                self.assistant.save_business_preferences(&prefs).await?;
                Ok(prefs)
            }
        }
    }

    pub async fn update_business_preferences(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        cmd: BusinessPreferencesCommand,
    ) -> ApplicationResult<BusinessPreferences> {
        self.policy.load_company(company_id).await?;
        self.policy.require_recruiting_admin(actor, company_id).await?;
        let mut prefs = self
            .assistant
            .business_preferences(company_id)
            .await?
            .unwrap_or_else(|| BusinessPreferences::empty(company_id));
        if cmd.company_overview.is_some() {
            prefs.company_overview = cmd.company_overview;
        }
        if cmd.culture_description.is_some() {
            prefs.culture_description = cmd.culture_description;
        }
        if cmd.values_description.is_some() {
            prefs.values_description = cmd.values_description;
        }
        if cmd.mission_statement.is_some() {
            prefs.mission_statement = cmd.mission_statement;
        }
        prefs.updated_at = Utc::now();
        self.assistant.save_business_preferences(&prefs).await?;
        Ok(prefs)
    }

    pub async fn communication_preferences(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<CommunicationPreferences> {
        self.policy.load_company(company_id).await?;
        self.policy.require_member(actor, company_id).await?;
        match self.assistant.communication_preferences(company_id).await? {
            Some(prefs) => Ok(prefs),
            None => {
                let prefs = CommunicationPreferences::defaults(company_id);
                self.assistant.save_communication_preferences(&prefs).await?;
                Ok(prefs)
            }
        }
    }

    pub async fn update_communication_preferences(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        cmd: CommunicationPreferencesCommand,
    ) -> ApplicationResult<CommunicationPreferences> {
        self.policy.load_company(company_id).await?;
        self.policy.require_recruiting_admin(actor, company_id).await?;
        let mut prefs = self
            .assistant
            .communication_preferences(company_id)
            .await?
            .unwrap_or_else(|| CommunicationPreferences::defaults(company_id));
        if let Some(tone) = cmd.tone {
            prefs.tone = tone;
        }
        if let Some(topics) = cmd.blocked_team_topics {
            prefs.blocked_team_topics = clean_topics(topics);
        }
        if let Some(topics) = cmd.blocked_candidate_topics {
            prefs.blocked_candidate_topics = clean_topics(topics);
        }
        prefs.updated_at = Utc::now();
        self.assistant.save_communication_preferences(&prefs).await?;
        Ok(prefs)
    }

    pub async fn screening_config(
        &self,
        actor: &Actor,
        job_id: JobId,
    ) -> ApplicationResult<JobScreeningConfig> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_review_access(actor, job.company_id).await?;
        Ok(self
            .assistant
            .screening_config(job_id)
            .await?
            .unwrap_or_else(|| JobScreeningConfig {
                job_id,
                is_enabled: false,
                guidance: None,
                updated_at: Utc::now(),
            }))
    }

    pub async fn update_screening_config(
        &self,
        actor: &Actor,
        job_id: JobId,
        cmd: ScreeningConfigCommand,
    ) -> ApplicationResult<JobScreeningConfig> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_hiring_access(actor, job.company_id).await?;
        let config = JobScreeningConfig {
            job_id,
            is_enabled: cmd.is_enabled,
            guidance: cmd.guidance,
            updated_at: Utc::now(),
        };
        self.assistant.save_screening_config(&config).await?;
        info!(job_id = %job_id, enabled = config.is_enabled, "screening config saved");
        Ok(config)
    }

    pub async fn scheduling_config(
        &self,
        actor: &Actor,
        job_id: JobId,
    ) -> ApplicationResult<JobSchedulingConfig> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_review_access(actor, job.company_id).await?;
        Ok(self
            .assistant
            .scheduling_config(job_id)
            .await?
            .unwrap_or_else(|| JobSchedulingConfig {
                job_id,
                is_enabled: false,
                preferred_duration_minutes: None,
                buffer_minutes: None,
                updated_at: Utc::now(),
            }))
    }

    pub async fn update_scheduling_config(
        &self,
        actor: &Actor,
        job_id: JobId,
        cmd: SchedulingConfigCommand,
    ) -> ApplicationResult<JobSchedulingConfig> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_hiring_access(actor, job.company_id).await?;
        let config = JobSchedulingConfig {
            job_id,
            is_enabled: cmd.is_enabled,
            preferred_duration_minutes: cmd.preferred_duration_minutes,
            buffer_minutes: cmd.buffer_minutes,
            updated_at: Utc::now(),
        };
        self.assistant.save_scheduling_config(&config).await?;
        info!(job_id = %job_id, enabled = config.is_enabled, "scheduling config saved");
        Ok(config)
    }

    pub async fn note_taking_config(
        &self,
        actor: &Actor,
        meeting_id: MeetingId,
    ) -> ApplicationResult<MeetingNoteTakingConfig> {
        let meeting = self.load_meeting(meeting_id).await?;
        if !meeting.involves(actor.user_id, &actor.email) {
            self.policy
                .require_review_access(actor, meeting.company_id)
                .await?;
        }
        Ok(self
            .assistant
            .note_taking_config(meeting_id)
            .await?
            .unwrap_or_else(|| MeetingNoteTakingConfig {
                meeting_id,
                is_enabled: false,
                share_with_attendees: false,
                updated_by: meeting.organizer_id,
                updated_at: Utc::now(),
            }))
    }

    pub async fn update_note_taking_config(
        &self,
        actor: &Actor,
        meeting_id: MeetingId,
        cmd: NoteTakingCommand,
    ) -> ApplicationResult<MeetingNoteTakingConfig> {
        let meeting = self.load_meeting(meeting_id).await?;
        if meeting.organizer_id != actor.user_id {
            self.policy
                .require_recruiting_admin(actor, meeting.company_id)
                .await?;
        }
        let config = MeetingNoteTakingConfig {
            meeting_id,
            is_enabled: cmd.is_enabled,
            share_with_attendees: cmd.share_with_attendees,
            updated_by: actor.user_id,
            updated_at: Utc::now(),
        };
        self.assistant.save_note_taking_config(&config).await?;
        Ok(config)
    }

    pub async fn log_interaction(
        &self,
        actor: &Actor,
        cmd: LogInteractionCommand,
    ) -> ApplicationResult<AiInteractionLog> {
        if let Some(company_id) = cmd.company_id {
            self.policy.require_member(actor, company_id).await?;
        }
        let log = AiInteractionLog {
            id: AiInteractionId::new(),
            user_id: actor.user_id,
            company_id: cmd.company_id,
            interaction_type: cmd.interaction_type.trim().to_string(),
            prompt: cmd.prompt,
            response: cmd.response,
            metadata: cmd.metadata,
            created_at: Utc::now(),
        };
        self.assistant.insert_interaction(&log).await?;
        Ok(log)
    }

    /// Mega admins see every interaction, everyone else only their own
    pub async fn interactions(
        &self,
        actor: &Actor,
        page: PageRequest,
    ) -> ApplicationResult<Page<AiInteractionLog>> {
        let scope = (!actor.is_mega_admin()).then_some(actor.user_id);
        Ok(page.apply(self.assistant.list_interactions(scope).await?))
    }

    async fn load_meeting(&self, id: MeetingId) -> ApplicationResult<Meeting> {
        self.scheduling
            .find_meeting(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Meeting not found."))
    }
}

fn clean_topics(topics: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(topics.len());
    for topic in topics {
        let topic = topic.trim();
        if !topic.is_empty() && !cleaned.iter().any(|t| t.eq_ignore_ascii_case(topic)) {
            cleaned.push(topic.to_string());
        }
    }
    cleaned
}
