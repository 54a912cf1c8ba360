//! Repository interfaces for data persistence
//!
//! The domain layer defines only the contracts; infrastructure crates implement them.
//! Inserts report `DomainError::UniqueViolation` when a uniqueness rule is broken and
//! updates/removals of missing rows report `DomainError::EntityNotFound`.

use async_trait::async_trait;

use crate::{entities::*, errors::*, value_objects::*};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; e-mail addresses are unique
    async fn insert(&self, user: &User) -> DomainResult<()>;
    async fn update(&self, user: &User) -> DomainResult<()>;
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    /// All users ordered by creation time
    async fn list(&self, page: PageRequest) -> DomainResult<Page<User>>;
}

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Persist a new company with its owner membership and seeded defaults, atomically
    async fn create(&self, setup: &CompanySetup) -> DomainResult<()>;
    async fn update(&self, company: &Company) -> DomainResult<()>;
    async fn find_by_id(&self, id: CompanyId) -> DomainResult<Option<Company>>;
    /// Companies the user belongs to, with the user's membership, ordered by name
    async fn list_for_user(&self, user_id: UserId)
        -> DomainResult<Vec<(Company, CompanyMember)>>;

    async fn find_member(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> DomainResult<Option<CompanyMember>>;
    async fn list_members(&self, company_id: CompanyId) -> DomainResult<Vec<CompanyMember>>;
    async fn add_member(&self, member: &CompanyMember) -> DomainResult<()>;
    async fn update_member(&self, member: &CompanyMember) -> DomainResult<()>;
    async fn remove_member(&self, company_id: CompanyId, user_id: UserId) -> DomainResult<()>;
}

/// Departments, locations and the careers page of a company
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn list_departments(&self, company_id: CompanyId) -> DomainResult<Vec<Department>>;
    async fn find_department(&self, id: DepartmentId) -> DomainResult<Option<Department>>;
    /// Insert or update; names are unique per company
    async fn save_department(&self, department: &Department) -> DomainResult<()>;
    /// Remove a department, detaching it from jobs
    async fn delete_department(&self, id: DepartmentId) -> DomainResult<()>;

    async fn list_locations(&self, company_id: CompanyId) -> DomainResult<Vec<JobLocation>>;
    async fn find_location(&self, id: LocationId) -> DomainResult<Option<JobLocation>>;
    async fn save_location(&self, location: &JobLocation) -> DomainResult<()>;
    /// Remove a location, detaching it from jobs
    async fn delete_location(&self, id: LocationId) -> DomainResult<()>;

    async fn careers_page(&self, company_id: CompanyId)
        -> DomainResult<Option<CareersPageSettings>>;
    async fn save_careers_page(&self, settings: &CareersPageSettings) -> DomainResult<()>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a job together with its initial hiring team
    async fn insert(&self, job: &Job, hiring_team: &[JobHiringMember]) -> DomainResult<()>;
    async fn update(&self, job: &Job) -> DomainResult<()>;
    /// Delete a job and everything hanging off it
    async fn delete(&self, id: JobId) -> DomainResult<()>;
    async fn find_by_id(&self, id: JobId) -> DomainResult<Option<Job>>;
    /// Matching jobs of a company, newest first
    async fn list_by_company(
        &self,
        company_id: CompanyId,
        filter: &JobFilter,
    ) -> DomainResult<Vec<Job>>;

    async fn list_hiring_team(&self, job_id: JobId) -> DomainResult<Vec<JobHiringMember>>;
    async fn find_hiring_member(
        &self,
        job_id: JobId,
        user_id: UserId,
    ) -> DomainResult<Option<JobHiringMember>>;
    async fn add_hiring_member(&self, member: &JobHiringMember) -> DomainResult<()>;
    async fn remove_hiring_member(&self, job_id: JobId, user_id: UserId) -> DomainResult<()>;
}

#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Insert a candidate and their first application; candidate e-mails are unique
    async fn insert(&self, candidate: &Candidate, application: &Application) -> DomainResult<()>;
    async fn update(&self, candidate: &Candidate) -> DomainResult<()>;
    /// Delete a candidate with their applications, ratings, transitions and messages
    async fn delete(&self, id: CandidateId) -> DomainResult<()>;
    async fn find_by_id(&self, id: CandidateId) -> DomainResult<Option<Candidate>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Candidate>>;
    /// Candidates with applications to any job of the company, with those applications
    async fn list_for_company(
        &self,
        company_id: CompanyId,
    ) -> DomainResult<Vec<(Candidate, Vec<Application>)>>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_by_id(&self, id: ApplicationId) -> DomainResult<Option<Application>>;
    async fn list_by_candidate(&self, candidate_id: CandidateId)
        -> DomainResult<Vec<Application>>;
    async fn list_by_job(&self, job_id: JobId) -> DomainResult<Vec<Application>>;
    async fn update(&self, application: &Application) -> DomainResult<()>;
    /// Save the moved application and append its transition record, atomically
    async fn record_transition(
        &self,
        application: &Application,
        transition: &StageTransition,
    ) -> DomainResult<()>;
    /// Transition history, oldest first
    async fn list_transitions(
        &self,
        application_id: ApplicationId,
    ) -> DomainResult<Vec<StageTransition>>;
}

#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    async fn insert_template(&self, template: &WorkflowTemplate) -> DomainResult<()>;
    /// Replace the stored template, stages included, as a single write
    async fn update_template(&self, template: &WorkflowTemplate) -> DomainResult<()>;
    /// Delete a template; job workflows cloned from it keep their stages and lose the link
    async fn delete_template(&self, id: WorkflowTemplateId) -> DomainResult<()>;
    async fn find_template(&self, id: WorkflowTemplateId)
        -> DomainResult<Option<WorkflowTemplate>>;
    /// Templates of a company ordered by name
    async fn list_templates(&self, company_id: CompanyId) -> DomainResult<Vec<WorkflowTemplate>>;

    async fn find_job_workflow(&self, job_id: JobId) -> DomainResult<Option<JobWorkflow>>;
    /// Upsert the job's workflow snapshot
    ///
    /// Applications of the job whose current stage is not part of the saved snapshot
    /// are moved to its first stage in the same write.
    async fn save_job_workflow(&self, workflow: &JobWorkflow) -> DomainResult<()>;
}

#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn insert_template(&self, template: &RatingCardTemplate) -> DomainResult<()>;
    /// Replace the stored template, categories included, as a single write
    async fn update_template(&self, template: &RatingCardTemplate) -> DomainResult<()>;
    async fn delete_template(&self, id: RatingCardTemplateId) -> DomainResult<()>;
    async fn find_template(
        &self,
        id: RatingCardTemplateId,
    ) -> DomainResult<Option<RatingCardTemplate>>;
    async fn list_templates(&self, company_id: CompanyId)
        -> DomainResult<Vec<RatingCardTemplate>>;
    async fn count_ratings_for_template(&self, id: RatingCardTemplateId) -> DomainResult<usize>;

    async fn insert_rating(&self, rating: &CandidateRating) -> DomainResult<()>;
    /// Ratings of an application, newest first
    async fn list_ratings(&self, application_id: ApplicationId)
        -> DomainResult<Vec<CandidateRating>>;
}

#[async_trait]
pub trait SchedulingRepository: Send + Sync {
    async fn insert_template(&self, template: &MeetingTemplate) -> DomainResult<()>;
    async fn update_template(&self, template: &MeetingTemplate) -> DomainResult<()>;
    async fn delete_template(&self, id: MeetingTemplateId) -> DomainResult<()>;
    async fn find_template(&self, id: MeetingTemplateId) -> DomainResult<Option<MeetingTemplate>>;
    async fn list_templates(&self, company_id: CompanyId) -> DomainResult<Vec<MeetingTemplate>>;

    async fn insert_meeting(&self, meeting: &Meeting) -> DomainResult<()>;
    async fn update_meeting(&self, meeting: &Meeting) -> DomainResult<()>;
    async fn find_meeting(&self, id: MeetingId) -> DomainResult<Option<Meeting>>;
    /// Meetings organised by or attended by the user, ordered by start time
    async fn list_meetings_for_user(&self, user_id: UserId, email: &str)
        -> DomainResult<Vec<Meeting>>;
}

#[async_trait]
pub trait MessagingRepository: Send + Sync {
    /// Fetch the application's thread, creating it on first use
    async fn thread_for_application(
        &self,
        application_id: ApplicationId,
    ) -> DomainResult<MessageThread>;
    async fn insert_message(&self, message: &Message) -> DomainResult<()>;
    /// Messages of a thread, newest first
    async fn list_messages(&self, thread_id: MessageThreadId) -> DomainResult<Vec<Message>>;

    async fn list_templates(&self, company_id: CompanyId) -> DomainResult<Vec<MessageTemplate>>;
    async fn find_template(&self, id: MessageTemplateId) -> DomainResult<Option<MessageTemplate>>;
    async fn insert_template(&self, template: &MessageTemplate) -> DomainResult<()>;
    async fn update_template(&self, template: &MessageTemplate) -> DomainResult<()>;
    async fn delete_template(&self, id: MessageTemplateId) -> DomainResult<()>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notifications: &[Notification]) -> DomainResult<()>;
    async fn update(&self, notification: &Notification) -> DomainResult<()>;
    async fn find_by_id(&self, id: NotificationId) -> DomainResult<Option<Notification>>;
    /// Notifications of a user, newest first
    async fn list_for_user(&self, user_id: UserId, unread_only: bool)
        -> DomainResult<Vec<Notification>>;
    async fn count_unread(&self, user_id: UserId) -> DomainResult<u64>;
    /// Mark every unread notification of the user as read, returning how many changed
    async fn mark_all_read(&self, user_id: UserId) -> DomainResult<u64>;
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn list_questions(&self, company_id: CompanyId) -> DomainResult<Vec<Question>>;
    async fn find_question(&self, id: QuestionId) -> DomainResult<Option<Question>>;
    async fn insert_question(&self, question: &Question) -> DomainResult<()>;
    async fn update_question(&self, question: &Question) -> DomainResult<()>;
    async fn delete_question(&self, id: QuestionId) -> DomainResult<()>;

    async fn list_sets(&self, company_id: CompanyId) -> DomainResult<Vec<QuestionSet>>;
    async fn find_set(&self, id: QuestionSetId) -> DomainResult<Option<QuestionSet>>;
    async fn insert_set(&self, set: &QuestionSet) -> DomainResult<()>;
    async fn update_set(&self, set: &QuestionSet) -> DomainResult<()>;
    async fn delete_set(&self, id: QuestionSetId) -> DomainResult<()>;
    /// Sets that include the question
    async fn sets_referencing(&self, question_id: QuestionId) -> DomainResult<Vec<QuestionSet>>;
}

#[async_trait]
pub trait AiAssistantRepository: Send + Sync {
    async fn business_preferences(
        &self,
        company_id: CompanyId,
    ) -> DomainResult<Option<BusinessPreferences>>;
    async fn save_business_preferences(&self, prefs: &BusinessPreferences) -> DomainResult<()>;
    async fn communication_preferences(
        &self,
        company_id: CompanyId,
    ) -> DomainResult<Option<CommunicationPreferences>>;
    async fn save_communication_preferences(
        &self,
        prefs: &CommunicationPreferences,
    ) -> DomainResult<()>;

    async fn screening_config(&self, job_id: JobId) -> DomainResult<Option<JobScreeningConfig>>;
    async fn save_screening_config(&self, config: &JobScreeningConfig) -> DomainResult<()>;
    async fn scheduling_config(&self, job_id: JobId)
        -> DomainResult<Option<JobSchedulingConfig>>;
    async fn save_scheduling_config(&self, config: &JobSchedulingConfig) -> DomainResult<()>;
    async fn note_taking_config(
        &self,
        meeting_id: MeetingId,
    ) -> DomainResult<Option<MeetingNoteTakingConfig>>;
    async fn save_note_taking_config(&self, config: &MeetingNoteTakingConfig)
        -> DomainResult<()>;

    async fn insert_interaction(&self, log: &AiInteractionLog) -> DomainResult<()>;
    /// Interaction logs newest first, optionally restricted to one user
    async fn list_interactions(&self, user_id: Option<UserId>)
        -> DomainResult<Vec<AiInteractionLog>>;
}

#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    /// Insert or replace the user's connection to a provider
    async fn upsert_calendar(&self, integration: &CalendarIntegration) -> DomainResult<()>;
    async fn list_calendars(&self, user_id: UserId) -> DomainResult<Vec<CalendarIntegration>>;
    async fn find_calendar(
        &self,
        user_id: UserId,
        provider: CalendarProvider,
    ) -> DomainResult<Option<CalendarIntegration>>;
    async fn delete_calendar(&self, user_id: UserId, provider: CalendarProvider)
        -> DomainResult<()>;
}
