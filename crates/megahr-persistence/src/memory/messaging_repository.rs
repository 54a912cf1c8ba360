//! In-Memory Messaging Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use megahr_domain::{
    entities::{Message, MessageTemplate, MessageThread},
    errors::DomainResult,
    repositories::MessagingRepository,
    value_objects::{ApplicationId, CompanyId, MessageTemplateId, MessageThreadId},
};

use super::store::{insert_unique, remove_existing, replace_existing, MemoryStore};

/// Thread-safe in-memory implementation of MessagingRepository
#[derive(Debug, Clone)]
pub struct InMemoryMessagingRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryMessagingRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessagingRepository for InMemoryMessagingRepository {
    async fn thread_for_application(
        &self,
        application_id: ApplicationId,
    ) -> DomainResult<MessageThread> {
        let thread = self.store.write(|t| {
            Ok(t.threads
                .entry(application_id)
                .or_insert_with(|| MessageThread {
                    id: MessageThreadId::new(),
                    application_id,
                    created_at: Utc::now(),
                })
                .clone())
        })?;
        Ok(thread)
    }

    async fn insert_message(&self, message: &Message) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(&mut t.messages, message.id, message.clone(), "Message", "id")
        })?;
        Ok(())
    }

    async fn list_messages(&self, thread_id: MessageThreadId) -> DomainResult<Vec<Message>> {
        let mut messages: Vec<Message> = self.store.read(|t| {
            t.messages
                .values()
                .filter(|m| m.thread_id == thread_id)
                .cloned()
                .collect()
        });
        messages.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(messages)
    }

    async fn list_templates(&self, company_id: CompanyId) -> DomainResult<Vec<MessageTemplate>> {
        let mut templates: Vec<MessageTemplate> = self.store.read(|t| {
            t.message_templates
                .values()
                .filter(|m| m.company_id == company_id)
                .cloned()
                .collect()
        });
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn find_template(&self, id: MessageTemplateId) -> DomainResult<Option<MessageTemplate>> {
        Ok(self.store.read(|t| t.message_templates.get(&id).cloned()))
    }

    async fn insert_template(&self, template: &MessageTemplate) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(
                &mut t.message_templates,
                template.id,
                template.clone(),
                "MessageTemplate",
                "id",
            )
        })?;
        Ok(())
    }

    async fn update_template(&self, template: &MessageTemplate) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(
                &mut t.message_templates,
                template.id,
                template.clone(),
                "MessageTemplate",
                template.id,
            )
        })?;
        Ok(())
    }

    async fn delete_template(&self, id: MessageTemplateId) -> DomainResult<()> {
        self.store.write(|t| {
            remove_existing(&mut t.message_templates, &id, "MessageTemplate", id).map(|_| ())
        })?;
        Ok(())
    }
}
