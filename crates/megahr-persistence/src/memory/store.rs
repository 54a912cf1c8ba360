//! Shared in-memory table set
//!
//! Every repository reads and writes through one `MemoryStore`, so writes that touch
//! several tables can be applied under a single lock.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use parking_lot::RwLock;

use megahr_domain::entities::*;
use megahr_domain::value_objects::*;

use crate::error::PersistenceError;

#[derive(Debug, Default, Clone)]
pub(crate) struct Tables {
    pub users: HashMap<UserId, User>,
    pub companies: HashMap<CompanyId, Company>,
    pub members: HashMap<(CompanyId, UserId), CompanyMember>,
    pub departments: HashMap<DepartmentId, Department>,
    pub locations: HashMap<LocationId, JobLocation>,
    pub careers_pages: HashMap<CompanyId, CareersPageSettings>,
    pub jobs: HashMap<JobId, Job>,
    pub hiring_team: HashMap<(JobId, UserId), JobHiringMember>,
    pub candidates: HashMap<CandidateId, Candidate>,
    pub applications: HashMap<ApplicationId, Application>,
    pub transitions: Vec<StageTransition>,
    pub workflow_templates: HashMap<WorkflowTemplateId, WorkflowTemplate>,
    pub job_workflows: HashMap<JobId, JobWorkflow>,
    pub rating_templates: HashMap<RatingCardTemplateId, RatingCardTemplate>,
    pub ratings: HashMap<CandidateRatingId, CandidateRating>,
    pub meeting_templates: HashMap<MeetingTemplateId, MeetingTemplate>,
    pub meetings: HashMap<MeetingId, Meeting>,
    pub threads: HashMap<ApplicationId, MessageThread>,
    pub messages: HashMap<MessageId, Message>,
    pub message_templates: HashMap<MessageTemplateId, MessageTemplate>,
    pub notifications: HashMap<NotificationId, Notification>,
    pub questions: HashMap<QuestionId, Question>,
    pub question_sets: HashMap<QuestionSetId, QuestionSet>,
    pub business_preferences: HashMap<CompanyId, BusinessPreferences>,
    pub communication_preferences: HashMap<CompanyId, CommunicationPreferences>,
    pub screening_configs: HashMap<JobId, JobScreeningConfig>,
    pub scheduling_configs: HashMap<JobId, JobSchedulingConfig>,
    pub note_taking_configs: HashMap<MeetingId, MeetingNoteTakingConfig>,
    pub ai_interactions: Vec<AiInteractionLog>,
    pub calendars: HashMap<(UserId, CalendarProvider), CalendarIntegration>,
}

impl Tables {
    /// Remove applications and everything attached to them
    pub fn purge_applications(&mut self, ids: &[ApplicationId]) {
        for id in ids {
            self.applications.remove(id);
            if let Some(thread) = self.threads.remove(id) {
                self.messages.retain(|_, m| m.thread_id != thread.id);
            }
        }
        self.ratings.retain(|_, r| !ids.contains(&r.application_id));
        self.transitions.retain(|t| !ids.contains(&t.application_id));
    }
}

/// Thread-safe table set shared by all in-memory repositories
///
/// Uses RwLock for concurrent read access with exclusive write access.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        f(&*self.tables.read())
    }

    /// Single-table write; the closure must check before it mutates
    pub(crate) fn write<R>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<R, PersistenceError>,
    ) -> Result<R, PersistenceError> {
        f(&mut *self.tables.write())
    }

    /// Multi-table write applied all-or-nothing
    ///
    /// The closure works on a draft copy which replaces the live tables only when it
    /// returns `Ok`.
    pub(crate) fn transaction<R>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<R, PersistenceError>,
    ) -> Result<R, PersistenceError> {
        let mut tables = self.tables.write();
        let mut draft = tables.clone();
        let out = f(&mut draft)?;
        *tables = draft;
        Ok(out)
    }
}

pub(crate) fn insert_unique<K: Eq + Hash, V>(
    map: &mut HashMap<K, V>,
    key: K,
    value: V,
    entity_type: &'static str,
    field: &'static str,
) -> Result<(), PersistenceError> {
    if map.contains_key(&key) {
        return Err(PersistenceError::unique(entity_type, field));
    }
    map.insert(key, value);
    Ok(())
}

pub(crate) fn replace_existing<K: Eq + Hash, V>(
    map: &mut HashMap<K, V>,
    key: K,
    value: V,
    entity_type: &'static str,
    id: impl Display,
) -> Result<(), PersistenceError> {
    match map.get_mut(&key) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(PersistenceError::not_found(entity_type, id)),
    }
}

pub(crate) fn remove_existing<K: Eq + Hash, V>(
    map: &mut HashMap<K, V>,
    key: &K,
    entity_type: &'static str,
    id: impl Display,
) -> Result<V, PersistenceError> {
    map.remove(key)
        .ok_or_else(|| PersistenceError::not_found(entity_type, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_transaction_leaves_tables_untouched() {
        let store = MemoryStore::new();
        let company = Company::new("Acme", UserId::new());
        let result: Result<(), _> = store.transaction(|t| {
            t.companies.insert(company.id, company.clone());
            Err(PersistenceError::unique("Company", "name"))
        });
        assert!(result.is_err());
        assert!(store.read(|t| t.companies.is_empty()));
    }

    #[test]
    fn insert_unique_rejects_duplicates() {
        let mut map = HashMap::new();
        insert_unique(&mut map, 1, "a", "Thing", "id").unwrap();
        let err = insert_unique(&mut map, 1, "b", "Thing", "id").unwrap_err();
        assert_eq!(err, PersistenceError::unique("Thing", "id"));
        assert_eq!(map[&1], "a");
    }
}
