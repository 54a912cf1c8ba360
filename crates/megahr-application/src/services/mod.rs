//! Application services
//!
//! One service per business area. Every service is stateless: state lives behind the
//! repository traits, infrastructure behind the ports, and permission rules in the
//! shared [`AccessPolicy`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Application Services                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  AuthService / UserService      - accounts and profiles      │
//! │  CompanyService                 - tenants, members, org data │
//! │  JobService / CandidateService  - requisitions and applicants│
//! │  WorkflowService                - templates and progression  │
//! │  RatingService                  - rubrics and scorecards     │
//! │  SchedulingService              - meetings and RSVPs         │
//! │  MessagingService               - threads and templates      │
//! │  QuestionService                - screening questions        │
//! │  NotificationService            - in-app notifications       │
//! │  AiAssistantService             - assistant configuration    │
//! │  IntegrationService             - calendar connections       │
//! │  CareersPageService             - public careers site        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod ai_assistant_service;
mod auth_service;
mod candidate_service;
mod careers_page_service;
mod company_service;
mod integration_service;
mod job_service;
mod messaging_service;
mod notification_service;
mod question_service;
mod rating_service;
mod scheduling_service;
mod user_service;
mod workflow_service;

use std::sync::Arc;

use megahr_domain::repositories::*;

use crate::access::AccessPolicy;
use crate::ports::{CalendarOAuth, PasswordHasher, ResumeStore, SecretCipher, TokenIssuer};

pub use ai_assistant_service::AiAssistantService;
pub use auth_service::AuthService;
pub use candidate_service::CandidateService;
pub use careers_page_service::CareersPageService;
pub use company_service::CompanyService;
pub use integration_service::IntegrationService;
pub use job_service::JobService;
pub use messaging_service::MessagingService;
pub use notification_service::NotificationService;
pub use question_service::QuestionService;
pub use rating_service::RatingService;
pub use scheduling_service::SchedulingService;
pub use user_service::UserService;
pub use workflow_service::WorkflowService;

/// Repository handles the services are built from
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub companies: Arc<dyn CompanyRepository>,
    pub organization: Arc<dyn OrganizationRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub candidates: Arc<dyn CandidateRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub workflows: Arc<dyn WorkflowRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub scheduling: Arc<dyn SchedulingRepository>,
    pub messaging: Arc<dyn MessagingRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub ai_assistant: Arc<dyn AiAssistantRepository>,
    pub integrations: Arc<dyn IntegrationRepository>,
}

/// Infrastructure adapters
#[derive(Clone)]
pub struct Ports {
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub cipher: Arc<dyn SecretCipher>,
    pub resumes: Arc<dyn ResumeStore>,
    pub calendar_oauth: Arc<dyn CalendarOAuth>,
}

/// Every service, wired once at startup
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub companies: CompanyService,
    pub jobs: JobService,
    pub candidates: CandidateService,
    pub workflows: WorkflowService,
    pub ratings: RatingService,
    pub scheduling: SchedulingService,
    pub messaging: MessagingService,
    pub questions: QuestionService,
    pub notifications: NotificationService,
    pub ai_assistant: AiAssistantService,
    pub integrations: IntegrationService,
    pub careers_page: CareersPageService,
}

impl Services {
    pub fn new(repos: Repositories, ports: Ports) -> Self {
        let policy = Arc::new(AccessPolicy::new(repos.companies.clone(), repos.jobs.clone()));
        let notifications =
            NotificationService::new(repos.notifications.clone(), repos.users.clone());

        Self {
            auth: AuthService::new(repos.users.clone(), ports.hasher.clone(), ports.tokens),
            users: UserService::new(repos.users.clone(), repos.companies.clone(), ports.hasher),
            companies: CompanyService::new(&repos, policy.clone()),
            jobs: JobService::new(&repos, policy.clone()),
            candidates: CandidateService::new(
                &repos,
                policy.clone(),
                notifications.clone(),
                ports.resumes,
            ),
            workflows: WorkflowService::new(&repos, policy.clone(), notifications.clone()),
            ratings: RatingService::new(&repos, policy.clone(), notifications.clone()),
            scheduling: SchedulingService::new(&repos, policy.clone(), notifications.clone()),
            messaging: MessagingService::new(&repos, policy.clone(), notifications.clone()),
            questions: QuestionService::new(repos.questions.clone(), policy.clone()),
            ai_assistant: AiAssistantService::new(&repos, policy.clone()),
            integrations: IntegrationService::new(
                repos.integrations.clone(),
                repos.users.clone(),
                ports.cipher,
                ports.calendar_oauth,
            ),
            careers_page: CareersPageService::new(&repos, policy),
            notifications,
        }
    }
}
