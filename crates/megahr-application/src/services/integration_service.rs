//! Calendar provider connections

use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{CalendarIntegration, CalendarProvider},
    repositories::{IntegrationRepository, UserRepository},
    value_objects::{CalendarIntegrationId, UserId},
};
use tracing::info;

use crate::access::Actor;
use crate::dto::ConnectCalendarResponse;
use crate::errors::{ApplicationError, ApplicationResult};
use crate::ports::{CalendarOAuth, SecretCipher};

pub struct IntegrationService {
    integrations: Arc<dyn IntegrationRepository>,
    users: Arc<dyn UserRepository>,
    cipher: Arc<dyn SecretCipher>,
    oauth: Arc<dyn CalendarOAuth>,
}

impl IntegrationService {
    pub fn new(
        integrations: Arc<dyn IntegrationRepository>,
        users: Arc<dyn UserRepository>,
        cipher: Arc<dyn SecretCipher>,
        oauth: Arc<dyn CalendarOAuth>,
    ) -> Self {
        Self {
            integrations,
            users,
            cipher,
            oauth,
        }
    }

    pub async fn list(&self, actor: &Actor) -> ApplicationResult<Vec<CalendarIntegration>> {
        Ok(self.integrations.list_calendars(actor.user_id).await?)
    }

    /// Consent URL for the provider; the caller's id travels as OAuth state
    pub fn connect(
        &self,
        actor: &Actor,
        provider: CalendarProvider,
    ) -> ApplicationResult<ConnectCalendarResponse> {
        let auth_url = self
            .oauth
            .authorization_url(provider, &actor.user_id.to_string())?;
        Ok(ConnectCalendarResponse { auth_url })
    }

    /// Complete the consent flow: exchange the code and store the tokens encrypted
    pub async fn complete(
        &self,
        provider: CalendarProvider,
        code: &str,
        state: &str,
    ) -> ApplicationResult<CalendarIntegration> {
        if code.trim().is_empty() {
            return Err(ApplicationError::bad_request("Missing authorization code."));
        }
        let user_id = UserId::parse(state)
            .map_err(|_| ApplicationError::bad_request("Invalid OAuth state."))?;
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ApplicationError::bad_request("Invalid OAuth state."));
        }

        let tokens = self.oauth.exchange_code(provider, code).await?;
        let access_token_encrypted = self.cipher.encrypt(&tokens.access_token)?;
        let refresh_token_encrypted = tokens
            .refresh_token
            .as_deref()
            .map(|t| self.cipher.encrypt(t))
            .transpose()?;

        let now = Utc::now();
        let existing = self.integrations.find_calendar(user_id, provider).await?;
        let integration = CalendarIntegration {
            id: existing.as_ref().map_or_else(CalendarIntegrationId::new, |e| e.id),
            user_id,
            provider,
            access_token_encrypted,
            refresh_token_encrypted,
            expires_at: tokens.expires_at,
            scope: tokens.scope,
            connected_at: existing.as_ref().map_or(now, |e| e.connected_at),
            updated_at: now,
        };
        self.integrations.upsert_calendar(&integration).await?;
        info!(user_id = %user_id, provider = provider.as_str(), "calendar connected");
        Ok(integration)
    }

    pub async fn disconnect(
        &self,
        actor: &Actor,
        provider: CalendarProvider,
    ) -> ApplicationResult<()> {
        if self
            .integrations
            .find_calendar(actor.user_id, provider)
            .await?
            .is_none()
        {
            return Err(ApplicationError::not_found("Calendar integration not found."));
        }
        self.integrations
            .delete_calendar(actor.user_id, provider)
            .await?;
        info!(user_id = %actor.user_id, provider = provider.as_str(), "calendar disconnected");
        Ok(())
    }
}
