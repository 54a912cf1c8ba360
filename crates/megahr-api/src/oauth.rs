//! Calendar OAuth2 clients (authorization-code flow)
//!
//! Consent URLs are real; the code exchange is mocked and makes no outbound call.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use oauth2::{
    basic::BasicClient, AuthUrl, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope, TokenUrl,
};

use megahr_application::errors::{ApplicationError, ApplicationResult};
use megahr_application::ports::{CalendarOAuth, OAuthTokens};
use megahr_domain::entities::CalendarProvider;

use crate::config::{ApiConfig, ConfigError};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/calendar.readonly",
    "https://www.googleapis.com/auth/calendar.events",
];

const MICROSOFT_AUTH_URL: &str = "https://login.microsoftonline.com/common/oauth2/v2.0/authorize";
const MICROSOFT_TOKEN_URL: &str = "https://login.microsoftonline.com/common/oauth2/v2.0/token";
const MICROSOFT_SCOPES: &[&str] = &["offline_access", "Calendars.ReadWrite"];

struct ProviderClient {
    client: BasicClient,
    scopes: &'static [&'static str],
}

/// One OAuth client per configured provider
pub struct CalendarOAuthClients {
    providers: HashMap<CalendarProvider, ProviderClient>,
}

impl CalendarOAuthClients {
    /// Providers without a complete client id/secret/redirect triple stay unconfigured
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let mut providers = HashMap::new();
        let candidates = [
            (
                CalendarProvider::GoogleWorkspace,
                &config.google_client_id,
                &config.google_client_secret,
                &config.google_redirect_uri,
                GOOGLE_AUTH_URL,
                GOOGLE_TOKEN_URL,
                GOOGLE_SCOPES,
            ),
            (
                CalendarProvider::Ms365Outlook,
                &config.outlook_client_id,
                &config.outlook_client_secret,
                &config.outlook_redirect_uri,
                MICROSOFT_AUTH_URL,
                MICROSOFT_TOKEN_URL,
                MICROSOFT_SCOPES,
            ),
        ];
        for (provider, id, secret, redirect, auth_url, token_url, scopes) in candidates {
            let (Some(id), Some(secret), Some(redirect)) = (id, secret, redirect) else {
                continue;
            };
            let invalid = |e: oauth2::url::ParseError| {
                ConfigError::Invalid(format!("{} OAuth settings: {e}", provider.as_str()))
            };
            let client = BasicClient::new(
                ClientId::new(id.clone()),
                Some(ClientSecret::new(secret.clone())),
                AuthUrl::new(auth_url.to_string()).map_err(invalid)?,
                Some(TokenUrl::new(token_url.to_string()).map_err(invalid)?),
            )
            .set_redirect_uri(RedirectUrl::new(redirect.clone()).map_err(invalid)?);
            providers.insert(provider, ProviderClient { client, scopes });
        }
        Ok(Self { providers })
    }

    fn client(&self, provider: CalendarProvider) -> ApplicationResult<&ProviderClient> {
        self.providers.get(&provider).ok_or_else(|| {
            ApplicationError::Configuration(format!(
                "OAuth client for {} is not configured",
                provider.as_str()
            ))
        })
    }
}

#[async_trait]
impl CalendarOAuth for CalendarOAuthClients {
    fn authorization_url(
        &self,
        provider: CalendarProvider,
        state: &str,
    ) -> ApplicationResult<String> {
        let entry = self.client(provider)?;
        let state = state.to_string();
        let mut request = entry.client.authorize_url(move || CsrfToken::new(state));
        for scope in entry.scopes {
            request = request.add_scope(Scope::new((*scope).to_string()));
        }
        if provider == CalendarProvider::GoogleWorkspace {
            request = request
                .add_extra_param("access_type", "offline")
                .add_extra_param("prompt", "consent");
        }
        let (url, _) = request.url();
        Ok(url.to_string())
    }

    async fn exchange_code(
        &self,
        provider: CalendarProvider,
        code: &str,
    ) -> ApplicationResult<OAuthTokens> {
        let entry = self.client(provider)?;
        let stamp = Utc::now().timestamp_millis();
        let tag = provider.as_str().to_ascii_lowercase();
        tracing::debug!(provider = provider.as_str(), code_len = code.len(), "mock token exchange");
        Ok(OAuthTokens {
            access_token: format!("mock_access_token_{tag}_{stamp}"),
            refresh_token: Some(format!("mock_refresh_token_{tag}_{stamp}")),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            scope: Some(entry.scopes.join(" ")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ApiConfig {
        ApiConfig {
            google_client_id: Some("client-1".into()),
            google_client_secret: Some("shh".into()),
            google_redirect_uri: Some("http://localhost:5000/callback".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_google_consent_url_carries_state() {
        let clients = CalendarOAuthClients::from_config(&config()).unwrap();
        let url = clients
            .authorization_url(CalendarProvider::GoogleWorkspace, "user-42")
            .unwrap();
        assert!(url.starts_with(GOOGLE_AUTH_URL));
        assert!(url.contains("state=user-42"));
        assert!(url.contains("client_id=client-1"));
        assert!(url.contains("access_type=offline"));
    }

    #[test]
    fn test_unconfigured_provider_is_a_configuration_error() {
        let clients = CalendarOAuthClients::from_config(&config()).unwrap();
        assert!(!clients.providers.contains_key(&CalendarProvider::Ms365Outlook));
        let err = clients
            .authorization_url(CalendarProvider::Ms365Outlook, "x")
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_exchange_grants_scoped_tokens() {
        let clients = CalendarOAuthClients::from_config(&config()).unwrap();
        let tokens = clients
            .exchange_code(CalendarProvider::GoogleWorkspace, "code")
            .await
            .unwrap();
        assert!(tokens.access_token.starts_with("mock_access_token_google_workspace_"));
        assert!(tokens.scope.unwrap().contains("calendar.events"));
        assert!(clients
            .exchange_code(CalendarProvider::Ms365Outlook, "code")
            .await
            .is_err());
    }

    #[test]
    fn test_bad_redirect_uri_fails_startup() {
        let config = ApiConfig {
            google_redirect_uri: Some("not a url".into()),
            ..config()
        };
        assert!(CalendarOAuthClients::from_config(&config).is_err());
    }
}
