//! Credential adapters: bcrypt password hashing, HS256 access tokens, AES-256-GCM secrets

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use megahr_application::errors::{ApplicationError, ApplicationResult};
use megahr_application::ports::{IssuedToken, PasswordHasher, SecretCipher, TokenIssuer};
use megahr_domain::entities::User;
use megahr_domain::roles::UserRole;
use megahr_domain::value_objects::UserId;

/// bcrypt with a configurable cost, run off the async executor
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ApplicationError::infrastructure(e.to_string()))?
            .map_err(|e| ApplicationError::infrastructure(format!("password hashing failed: {e}")))
    }

    async fn verify(&self, password: &str, hash: &str) -> ApplicationResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ApplicationError::infrastructure(e.to_string()))?;
        // A malformed stored hash is a failed login, not a server error
        Ok(verified.unwrap_or(false))
    }
}

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies HS256 access tokens
pub struct JwtTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokens {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Subject of a valid, unexpired token
    pub fn verify(&self, token: &str) -> Option<UserId> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| tracing::debug!(error = %e, "token rejected"))
            .ok()?;
        UserId::parse(&data.claims.sub).ok()
    }
}

impl TokenIssuer for JwtTokens {
    fn issue(&self, user: &User) -> ApplicationResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApplicationError::infrastructure(format!("token signing failed: {e}")))?;
        Ok(IssuedToken { token, expires_at })
    }
}

/// AES-256-GCM; output is `base64(nonce):base64(ciphertext+tag)`
pub struct AesCipher {
    cipher: Aes256Gcm,
}

impl AesCipher {
    const NONCE_LEN: usize = 12;

    pub fn new(key: [u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(&key.into()),
        }
    }
}

impl SecretCipher for AesCipher {
    fn encrypt(&self, plaintext: &str) -> ApplicationResult<String> {
        let mut nonce = [0u8; Self::NONCE_LEN];
        rand::thread_rng().fill(&mut nonce);
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|e| ApplicationError::infrastructure(format!("encryption failed: {e}")))?;
        Ok(format!(
            "{}:{}",
            general_purpose::STANDARD.encode(nonce),
            general_purpose::STANDARD.encode(ciphertext)
        ))
    }

    fn decrypt(&self, encoded: &str) -> ApplicationResult<String> {
        let failed = || ApplicationError::infrastructure("Failed to decrypt data.");
        let (nonce, ciphertext) = encoded.split_once(':').ok_or_else(failed)?;
        let nonce = general_purpose::STANDARD.decode(nonce).map_err(|_| failed())?;
        let ciphertext = general_purpose::STANDARD
            .decode(ciphertext)
            .map_err(|_| failed())?;
        if nonce.len() != Self::NONCE_LEN {
            return Err(failed());
        }
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(&nonce), ciphertext.as_ref())
            .map_err(|_| failed())?;
        String::from_utf8(plaintext).map_err(|_| failed())
    }
}
