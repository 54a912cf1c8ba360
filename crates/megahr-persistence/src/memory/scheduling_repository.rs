//! In-Memory Scheduling Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::{Meeting, MeetingTemplate},
    errors::DomainResult,
    repositories::SchedulingRepository,
    value_objects::{CompanyId, MeetingId, MeetingTemplateId, UserId},
};

use super::store::{insert_unique, remove_existing, replace_existing, MemoryStore};

/// Thread-safe in-memory implementation of SchedulingRepository
#[derive(Debug, Clone)]
pub struct InMemorySchedulingRepository {
    store: Arc<MemoryStore>,
}

impl InMemorySchedulingRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SchedulingRepository for InMemorySchedulingRepository {
    async fn insert_template(&self, template: &MeetingTemplate) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(
                &mut t.meeting_templates,
                template.id,
                template.clone(),
                "MeetingTemplate",
                "id",
            )
        })?;
        Ok(())
    }

    async fn update_template(&self, template: &MeetingTemplate) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(
                &mut t.meeting_templates,
                template.id,
                template.clone(),
                "MeetingTemplate",
                template.id,
            )
        })?;
        Ok(())
    }

    async fn delete_template(&self, id: MeetingTemplateId) -> DomainResult<()> {
        self.store.write(|t| {
            remove_existing(&mut t.meeting_templates, &id, "MeetingTemplate", id).map(|_| ())
        })?;
        Ok(())
    }

    async fn find_template(&self, id: MeetingTemplateId) -> DomainResult<Option<MeetingTemplate>> {
        Ok(self.store.read(|t| t.meeting_templates.get(&id).cloned()))
    }

    async fn list_templates(&self, company_id: CompanyId) -> DomainResult<Vec<MeetingTemplate>> {
        let mut templates: Vec<MeetingTemplate> = self.store.read(|t| {
            t.meeting_templates
                .values()
                .filter(|m| m.company_id == company_id)
                .cloned()
                .collect()
        });
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn insert_meeting(&self, meeting: &Meeting) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(&mut t.meetings, meeting.id, meeting.clone(), "Meeting", "id")
        })?;
        Ok(())
    }

    async fn update_meeting(&self, meeting: &Meeting) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(&mut t.meetings, meeting.id, meeting.clone(), "Meeting", meeting.id)
        })?;
        Ok(())
    }

    async fn find_meeting(&self, id: MeetingId) -> DomainResult<Option<Meeting>> {
        Ok(self.store.read(|t| t.meetings.get(&id).cloned()))
    }

    async fn list_meetings_for_user(
        &self,
        user_id: UserId,
        email: &str,
    ) -> DomainResult<Vec<Meeting>> {
        let mut meetings: Vec<Meeting> = self.store.read(|t| {
            t.meetings
                .values()
                .filter(|m| m.involves(user_id, email))
                .cloned()
                .collect()
        });
        meetings.sort_by_key(|m| m.start_time);
        Ok(meetings)
    }
}
