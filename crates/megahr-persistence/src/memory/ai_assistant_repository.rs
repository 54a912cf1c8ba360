//! In-Memory AI Assistant Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::{
        AiInteractionLog, BusinessPreferences, CommunicationPreferences, JobSchedulingConfig,
        JobScreeningConfig, MeetingNoteTakingConfig,
    },
    errors::DomainResult,
    repositories::AiAssistantRepository,
    value_objects::{CompanyId, JobId, MeetingId, UserId},
};

use super::store::MemoryStore;

/// Thread-safe in-memory implementation of AiAssistantRepository
#[derive(Debug, Clone)]
pub struct InMemoryAiAssistantRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryAiAssistantRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AiAssistantRepository for InMemoryAiAssistantRepository {
    async fn business_preferences(
        &self,
        company_id: CompanyId,
    ) -> DomainResult<Option<BusinessPreferences>> {
        Ok(self
            .store
            .read(|t| t.business_preferences.get(&company_id).cloned()))
    }

    async fn save_business_preferences(&self, prefs: &BusinessPreferences) -> DomainResult<()> {
        self.store.write(|t| {
            t.business_preferences.insert(prefs.company_id, prefs.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn communication_preferences(
        &self,
        company_id: CompanyId,
    ) -> DomainResult<Option<CommunicationPreferences>> {
        Ok(self
            .store
            .read(|t| t.communication_preferences.get(&company_id).cloned()))
    }

    async fn save_communication_preferences(
        &self,
        prefs: &CommunicationPreferences,
    ) -> DomainResult<()> {
        self.store.write(|t| {
            t.communication_preferences
                .insert(prefs.company_id, prefs.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn screening_config(&self, job_id: JobId) -> DomainResult<Option<JobScreeningConfig>> {
        Ok(self.store.read(|t| t.screening_configs.get(&job_id).cloned()))
    }

    async fn save_screening_config(&self, config: &JobScreeningConfig) -> DomainResult<()> {
        self.store.write(|t| {
            t.screening_configs.insert(config.job_id, config.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn scheduling_config(
        &self,
        job_id: JobId,
    ) -> DomainResult<Option<JobSchedulingConfig>> {
        Ok(self.store.read(|t| t.scheduling_configs.get(&job_id).cloned()))
    }

    async fn save_scheduling_config(&self, config: &JobSchedulingConfig) -> DomainResult<()> {
        self.store.write(|t| {
            t.scheduling_configs.insert(config.job_id, config.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn note_taking_config(
        &self,
        meeting_id: MeetingId,
    ) -> DomainResult<Option<MeetingNoteTakingConfig>> {
        Ok(self
            .store
            .read(|t| t.note_taking_configs.get(&meeting_id).cloned()))
    }

    async fn save_note_taking_config(
        &self,
        config: &MeetingNoteTakingConfig,
    ) -> DomainResult<()> {
        self.store.write(|t| {
            t.note_taking_configs
                .insert(config.meeting_id, config.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn insert_interaction(&self, log: &AiInteractionLog) -> DomainResult<()> {
        self.store.write(|t| {
            t.ai_interactions.push(log.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn list_interactions(
        &self,
        user_id: Option<UserId>,
    ) -> DomainResult<Vec<AiInteractionLog>> {
        Ok(self.store.read(|t| {
            t.ai_interactions
                .iter()
                .rev()
                .filter(|log| user_id.map_or(true, |u| log.user_id == u))
                .cloned()
                .collect()
        }))
    }
}
