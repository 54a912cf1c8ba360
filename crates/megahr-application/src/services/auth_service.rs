//! Registration, login and token resolution

use std::sync::Arc;

use megahr_domain::{
    entities::User, repositories::UserRepository, roles::UserRole, value_objects::UserId,
};
use tracing::{info, warn};

use crate::dto::{AuthResponse, LoginCommand, RegisterCommand};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::ports::{PasswordHasher, TokenIssuer};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const USER_EXISTS: &str = "User already exists with this email.";
pub const TOKEN_USER_MISSING: &str = "User not found for this token.";

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn register(&self, cmd: RegisterCommand) -> ApplicationResult<AuthResponse> {
        if self.users.find_by_email(&cmd.email).await?.is_some() {
            return Err(ApplicationError::conflict(USER_EXISTS));
        }

        let hash = self.hasher.hash(&cmd.password).await?;
        let mut user = User::new(
            &cmd.email,
            hash,
            cmd.first_name.trim(),
            cmd.last_name.trim(),
            UserRole::Standard,
        );
        user.job_title = cmd.job_title;
        self.users.insert(&user).await?;
        info!(user_id = %user.id, "user registered");

        self.respond(user)
    }

    pub async fn login(&self, cmd: LoginCommand) -> ApplicationResult<AuthResponse> {
        let Some(user) = self.users.find_by_email(&cmd.email).await? else {
            warn!("login attempt for unknown email");
            return Err(ApplicationError::Unauthorized(INVALID_CREDENTIALS.into()));
        };
        if !self.hasher.verify(&cmd.password, &user.password_hash).await? {
            warn!(user_id = %user.id, "login attempt with wrong password");
            return Err(ApplicationError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
        info!(user_id = %user.id, "user logged in");
        self.respond(user)
    }

    /// Resolve the subject of a verified token to a live user
    pub async fn authenticate(&self, user_id: UserId) -> ApplicationResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::Unauthorized(TOKEN_USER_MISSING.into()))
    }

    fn respond(&self, user: User) -> ApplicationResult<AuthResponse> {
        let issued = self.tokens.issue(&user)?;
        Ok(AuthResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }
}
