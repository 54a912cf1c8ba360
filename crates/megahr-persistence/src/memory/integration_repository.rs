//! In-Memory Integration Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::{CalendarIntegration, CalendarProvider},
    errors::DomainResult,
    repositories::IntegrationRepository,
    value_objects::UserId,
};

use super::store::{remove_existing, MemoryStore};

/// Thread-safe in-memory implementation of IntegrationRepository
#[derive(Debug, Clone)]
pub struct InMemoryIntegrationRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryIntegrationRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IntegrationRepository for InMemoryIntegrationRepository {
    async fn upsert_calendar(&self, integration: &CalendarIntegration) -> DomainResult<()> {
        self.store.write(|t| {
            let key = (integration.user_id, integration.provider);
            let mut row = integration.clone();
            if let Some(existing) = t.calendars.get(&key) {
                row.id = existing.id;
                row.connected_at = existing.connected_at;
            }
            t.calendars.insert(key, row);
            Ok(())
        })?;
        Ok(())
    }

    async fn list_calendars(&self, user_id: UserId) -> DomainResult<Vec<CalendarIntegration>> {
        let mut calendars: Vec<CalendarIntegration> = self.store.read(|t| {
            t.calendars
                .values()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect()
        });
        calendars.sort_by_key(|c| c.connected_at);
        Ok(calendars)
    }

    async fn find_calendar(
        &self,
        user_id: UserId,
        provider: CalendarProvider,
    ) -> DomainResult<Option<CalendarIntegration>> {
        Ok(self.store.read(|t| t.calendars.get(&(user_id, provider)).cloned()))
    }

    async fn delete_calendar(
        &self,
        user_id: UserId,
        provider: CalendarProvider,
    ) -> DomainResult<()> {
        self.store.write(|t| {
            remove_existing(
                &mut t.calendars,
                &(user_id, provider),
                "CalendarIntegration",
                provider.as_str(),
            )
            .map(|_| ())
        })?;
        Ok(())
    }
}
