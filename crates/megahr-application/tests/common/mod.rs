//! Shared fixtures for service tests: mock ports over the in-memory repositories

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use megahr_application::access::Actor;
use megahr_application::dto::{
    CreateCandidateCommand, CreateCompanyCommand, CreateJobCommand, CreateWorkflowTemplateCommand,
    HiringTeamInput, StageInput,
};
use megahr_application::errors::{ApplicationError, ApplicationResult};
use megahr_application::ports::*;
use megahr_application::services::{Ports, Repositories, Services};

use megahr_domain::entities::*;
use megahr_domain::repositories::*;
use megahr_domain::roles::{CompanyMemberRole, UserRole};
use megahr_persistence::InMemoryRepositories;

// ============================================================================
// Mock Ports
// ============================================================================

/// Reversible "hash" so tests never pay for bcrypt
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> ApplicationResult<bool> {
        Ok(hash == format!("plain:{password}"))
    }
}

pub struct StaticTokens;

impl TokenIssuer for StaticTokens {
    fn issue(&self, user: &User) -> ApplicationResult<IssuedToken> {
        Ok(IssuedToken {
            token: format!("token-{}", user.id),
            expires_at: Utc::now() + Duration::hours(1),
        })
    }
}

pub struct ReversingCipher;

impl SecretCipher for ReversingCipher {
    fn encrypt(&self, plaintext: &str) -> ApplicationResult<String> {
        Ok(plaintext.chars().rev().collect())
    }

    fn decrypt(&self, ciphertext: &str) -> ApplicationResult<String> {
        Ok(ciphertext.chars().rev().collect())
    }
}

#[derive(Default)]
pub struct MemoryResumes {
    pub files: RwLock<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl ResumeStore for MemoryResumes {
    async fn save(&self, original_name: &str, bytes: Vec<u8>) -> ApplicationResult<String> {
        let url = format!(
            "/uploads/resumes/{}-{}",
            uuid::Uuid::new_v4(),
            original_name
        );
        self.files.write().unwrap().insert(url.clone(), bytes);
        Ok(url)
    }

    async fn read(&self, url: &str) -> ApplicationResult<Option<StoredFile>> {
        Ok(self.files.read().unwrap().get(url).map(|bytes| StoredFile {
            file_name: url.rsplit('/').next().unwrap_or_default().to_string(),
            bytes: bytes.clone(),
        }))
    }

    async fn remove(&self, url: &str) -> ApplicationResult<()> {
        self.files.write().unwrap().remove(url);
        Ok(())
    }
}

pub struct FakeCalendarOAuth;

#[async_trait]
impl CalendarOAuth for FakeCalendarOAuth {
    fn authorization_url(
        &self,
        provider: CalendarProvider,
        state: &str,
    ) -> ApplicationResult<String> {
        match provider {
            CalendarProvider::GoogleWorkspace => {
                Ok(format!("https://accounts.example.com/auth?state={state}"))
            }
            CalendarProvider::Ms365Outlook => Err(ApplicationError::Configuration(
                "MS_365_OUTLOOK is not configured".into(),
            )),
        }
    }

    async fn exchange_code(
        &self,
        _provider: CalendarProvider,
        code: &str,
    ) -> ApplicationResult<OAuthTokens> {
        Ok(OAuthTokens {
            access_token: format!("access-{code}"),
            refresh_token: Some(format!("refresh-{code}")),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            scope: Some("calendar".into()),
        })
    }
}

// ============================================================================
// World
// ============================================================================

pub struct World {
    pub services: Services,
    pub repos: InMemoryRepositories,
    pub resumes: Arc<MemoryResumes>,
}

pub fn world() -> World {
    let repos = InMemoryRepositories::default();
    let resumes = Arc::new(MemoryResumes::default());
    let services = Services::new(
        Repositories {
            users: repos.users.clone(),
            companies: repos.companies.clone(),
            organization: repos.organization.clone(),
            jobs: repos.jobs.clone(),
            candidates: repos.candidates.clone(),
            applications: repos.applications.clone(),
            workflows: repos.workflows.clone(),
            ratings: repos.ratings.clone(),
            scheduling: repos.scheduling.clone(),
            messaging: repos.messaging.clone(),
            notifications: repos.notifications.clone(),
            questions: repos.questions.clone(),
            ai_assistant: repos.ai_assistant.clone(),
            integrations: repos.integrations.clone(),
        },
        Ports {
            hasher: Arc::new(PlainHasher),
            tokens: Arc::new(StaticTokens),
            cipher: Arc::new(ReversingCipher),
            resumes: resumes.clone(),
            calendar_oauth: Arc::new(FakeCalendarOAuth),
        },
    );
    World {
        services,
        repos,
        resumes,
    }
}

impl World {
    pub async fn user(&self, email: &str, role: UserRole) -> Actor {
        let user = User::new(email, "plain:password123".into(), "Test", "User", role);
        self.repos.users.insert(&user).await.unwrap();
        Actor::from_user(&user)
    }

    pub async fn company(&self, owner: &Actor) -> Company {
        self.services
            .companies
            .create(
                owner,
                CreateCompanyCommand {
                    name: "Acme".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
    }

    pub async fn join(&self, company: &Company, actor: &Actor, role: CompanyMemberRole) {
        self.repos
            .companies
            .add_member(&CompanyMember::new(company.id, actor.user_id, role))
            .await
            .unwrap();
    }

    pub async fn job(&self, owner: &Actor, company: &Company, team: &[&Actor]) -> Job {
        let cmd = CreateJobCommand {
            title: "Backend Engineer".into(),
            description: "Rust services".into(),
            employment_type: EmploymentType::FullTime,
            work_type: WorkType::Remote,
            status: Some(JobStatus::Published),
            salary_min: Some(100_000.0),
            salary_max: Some(150_000.0),
            currency: Some("USD".into()),
            pay_period: Some("YEAR".into()),
            display_salary: Some(false),
            job_code: None,
            department_id: None,
            location_id: None,
            min_years_experience: None,
            hiring_team: team
                .iter()
                .map(|a| HiringTeamInput {
                    user_id: a.user_id,
                    role: CompanyMemberRole::Reviewer,
                    is_external_recruiter: false,
                })
                .collect(),
        };
        self.services
            .jobs
            .create(owner, company.id, cmd)
            .await
            .unwrap()
            .job
    }

    /// Three-stage template: Applied, Screen, Interview
    pub async fn pipeline(&self, owner: &Actor, company: &Company) -> WorkflowTemplate {
        let stage = |name: &str, stage_type, order| StageInput {
            name: name.into(),
            stage_type,
            order,
            settings: None,
            visibility_to_reviewers: false,
            is_default: false,
            can_be_deleted: true,
        };
        self.services
            .workflows
            .create_template(
                owner,
                company.id,
                CreateWorkflowTemplateCommand {
                    name: "Engineering".into(),
                    is_default: false,
                    stages: vec![
                        stage("Applied", StageType::Applied, 0),
                        stage("Screen", StageType::Screening, 1),
                        stage("Interview", StageType::Interview, 2),
                    ],
                },
            )
            .await
            .unwrap()
    }

    pub async fn apply(&self, owner: &Actor, job: &Job, email: &str) -> Application {
        self.services
            .candidates
            .create(
                owner,
                CreateCandidateCommand {
                    first_name: "Ada".into(),
                    last_name: "Lovelace".into(),
                    email: email.into(),
                    job_id: job.id.to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .applications
            .remove(0)
    }
}
