//! In-Memory Repository Implementations
//!
//! Thread-safe in-memory implementations of domain repository interfaces, all backed
//! by one shared [`MemoryStore`].

mod ai_assistant_repository;
mod application_repository;
mod candidate_repository;
mod company_repository;
mod integration_repository;
mod job_repository;
mod messaging_repository;
mod notification_repository;
mod organization_repository;
mod question_repository;
mod rating_repository;
mod scheduling_repository;
mod store;
mod user_repository;
mod workflow_repository;

use std::sync::Arc;

pub use ai_assistant_repository::InMemoryAiAssistantRepository;
pub use application_repository::InMemoryApplicationRepository;
pub use candidate_repository::InMemoryCandidateRepository;
pub use company_repository::InMemoryCompanyRepository;
pub use integration_repository::InMemoryIntegrationRepository;
pub use job_repository::InMemoryJobRepository;
pub use messaging_repository::InMemoryMessagingRepository;
pub use notification_repository::InMemoryNotificationRepository;
pub use organization_repository::InMemoryOrganizationRepository;
pub use question_repository::InMemoryQuestionRepository;
pub use rating_repository::InMemoryRatingRepository;
pub use scheduling_repository::InMemorySchedulingRepository;
pub use store::MemoryStore;
pub use user_repository::InMemoryUserRepository;
pub use workflow_repository::InMemoryWorkflowRepository;

/// Every in-memory repository, sharing one store
#[derive(Debug, Clone)]
pub struct InMemoryRepositories {
    pub users: Arc<InMemoryUserRepository>,
    pub companies: Arc<InMemoryCompanyRepository>,
    pub organization: Arc<InMemoryOrganizationRepository>,
    pub jobs: Arc<InMemoryJobRepository>,
    pub candidates: Arc<InMemoryCandidateRepository>,
    pub applications: Arc<InMemoryApplicationRepository>,
    pub workflows: Arc<InMemoryWorkflowRepository>,
    pub ratings: Arc<InMemoryRatingRepository>,
    pub scheduling: Arc<InMemorySchedulingRepository>,
    pub messaging: Arc<InMemoryMessagingRepository>,
    pub notifications: Arc<InMemoryNotificationRepository>,
    pub questions: Arc<InMemoryQuestionRepository>,
    pub ai_assistant: Arc<InMemoryAiAssistantRepository>,
    pub integrations: Arc<InMemoryIntegrationRepository>,
}

impl InMemoryRepositories {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            companies: Arc::new(InMemoryCompanyRepository::new(store.clone())),
            organization: Arc::new(InMemoryOrganizationRepository::new(store.clone())),
            jobs: Arc::new(InMemoryJobRepository::new(store.clone())),
            candidates: Arc::new(InMemoryCandidateRepository::new(store.clone())),
            applications: Arc::new(InMemoryApplicationRepository::new(store.clone())),
            workflows: Arc::new(InMemoryWorkflowRepository::new(store.clone())),
            ratings: Arc::new(InMemoryRatingRepository::new(store.clone())),
            scheduling: Arc::new(InMemorySchedulingRepository::new(store.clone())),
            messaging: Arc::new(InMemoryMessagingRepository::new(store.clone())),
            notifications: Arc::new(InMemoryNotificationRepository::new(store.clone())),
            questions: Arc::new(InMemoryQuestionRepository::new(store.clone())),
            ai_assistant: Arc::new(InMemoryAiAssistantRepository::new(store.clone())),
            integrations: Arc::new(InMemoryIntegrationRepository::new(store)),
        }
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
