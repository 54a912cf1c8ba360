//! Request extractors: bearer authentication, platform-role guard, JSON/path/query
//! wrappers that reject with the error envelope, and validated JSON bodies.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
};
use megahr_application::{dto::Validate, Actor};
use megahr_domain::{roles::UserRole, value_objects::PageRequest};
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub const NO_TOKEN: &str = "Not authorized, no token";
pub const TOKEN_FAILED: &str = "Not authorized, token failed";
pub const REQUIRED_ROLE: &str = "Forbidden: You do not have the required role";

/// JSON body rejected through [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// JSON body that must also pass its field validation
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// The authenticated caller
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

impl AuthUser {
    /// Platform-role gate
    pub fn require_role(&self, roles: &[UserRole]) -> ApiResult<()> {
        if roles.contains(&self.0.role) {
            Ok(())
        } else {
            tracing::warn!(
                user_id = %self.0.user_id,
                role = ?self.0.role,
                "platform role rejected"
            );
            Err(ApiError::Forbidden(REQUIRED_ROLE.into()))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized(NO_TOKEN.into()))?;

        let user_id = state
            .tokens
            .verify(token)
            .ok_or_else(|| ApiError::Unauthorized(TOKEN_FAILED.into()))?;

        let user = state.services.auth.authenticate(user_id).await?;
        Ok(Self(Actor::from_user(&user)))
    }
}

/// `?page=&limit=`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::new(query.page, query.limit)
    }
}
