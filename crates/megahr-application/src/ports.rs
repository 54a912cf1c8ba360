//! Ports to infrastructure the application layer depends on
//!
//! Implementations live in the API crate (bcrypt, JWT, AES-GCM, local disk, OAuth2).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use megahr_domain::entities::{CalendarProvider, User};

use crate::errors::ApplicationResult;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<String>;
    async fn verify(&self, password: &str, hash: &str) -> ApplicationResult<bool>;
}

/// A signed access token
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> ApplicationResult<IssuedToken>;
}

/// Symmetric encryption for secrets kept at rest
pub trait SecretCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> ApplicationResult<String>;
    fn decrypt(&self, ciphertext: &str) -> ApplicationResult<String>;
}

/// A stored résumé read back from the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Persist an upload, returning the public URL it is referenced by
    async fn save(&self, original_name: &str, bytes: Vec<u8>) -> ApplicationResult<String>;
    async fn read(&self, url: &str) -> ApplicationResult<Option<StoredFile>>;
    async fn remove(&self, url: &str) -> ApplicationResult<()>;
}

/// Tokens granted by a calendar provider
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub scope: Option<String>,
}

#[async_trait]
pub trait CalendarOAuth: Send + Sync {
    /// Consent URL the user is sent to; `state` comes back on the callback
    fn authorization_url(&self, provider: CalendarProvider, state: &str)
        -> ApplicationResult<String>;
    async fn exchange_code(
        &self,
        provider: CalendarProvider,
        code: &str,
    ) -> ApplicationResult<OAuthTokens>;
}
