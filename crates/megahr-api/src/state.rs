//! Application state shared across all API handlers

use std::sync::Arc;
use std::time::Instant;

use megahr_application::services::{Ports, Repositories, Services};
use megahr_persistence::InMemoryRepositories;

use crate::config::{ApiConfig, ConfigError};
use crate::oauth::CalendarOAuthClients;
use crate::security::{AesCipher, BcryptHasher, JwtTokens};
use crate::uploads::DiskResumeStore;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    /// Kept beside the services so the auth extractor can verify tokens
    pub tokens: Arc<JwtTokens>,
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Wire the services over a fresh in-memory store
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        Self::with_repositories(config, InMemoryRepositories::default())
    }

    pub fn with_repositories(
        config: ApiConfig,
        repos: InMemoryRepositories,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let tokens = Arc::new(JwtTokens::new(&config.jwt_secret, config.jwt_expires_in_secs));
        let ports = Ports {
            hasher: Arc::new(BcryptHasher::new(config.bcrypt_cost)),
            tokens: tokens.clone(),
            cipher: Arc::new(AesCipher::new(config.encryption_key_bytes()?)),
            resumes: Arc::new(DiskResumeStore::new(&config.upload_dir)),
            calendar_oauth: Arc::new(CalendarOAuthClients::from_config(&config)?),
        };
        let services = Services::new(repositories(repos), ports);

        Ok(Self {
            services: Arc::new(services),
            tokens,
            config: Arc::new(config),
            start_time: Instant::now(),
        })
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

fn repositories(repos: InMemoryRepositories) -> Repositories {
    Repositories {
        users: repos.users,
        companies: repos.companies,
        organization: repos.organization,
        jobs: repos.jobs,
        candidates: repos.candidates,
        applications: repos.applications,
        workflows: repos.workflows,
        ratings: repos.ratings,
        scheduling: repos.scheduling,
        messaging: repos.messaging,
        notifications: repos.notifications,
        questions: repos.questions,
        ai_assistant: repos.ai_assistant,
        integrations: repos.integrations,
    }
}
