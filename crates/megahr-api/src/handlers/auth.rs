//! Registration, login and the current account

use axum::extract::State;
use megahr_application::dto::{AuthResponse, LoginCommand, RegisterCommand};
use megahr_domain::entities::User;

use crate::{
    error::ApiResult,
    extract::{AuthUser, ValidJson},
    response::Reply,
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    ValidJson(cmd): ValidJson<RegisterCommand>,
) -> ApiResult<Reply<AuthResponse>> {
    let response = state.services.auth.register(cmd).await?;
    Ok(Reply::created(response).message("User registered successfully."))
}

pub async fn login(
    State(state): State<AppState>,
    ValidJson(cmd): ValidJson<LoginCommand>,
) -> ApiResult<Reply<AuthResponse>> {
    let response = state.services.auth.login(cmd).await?;
    Ok(Reply::ok(response).message("Login successful."))
}

pub async fn me(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Reply<User>> {
    Ok(Reply::ok(state.services.users.profile(&actor).await?))
}
