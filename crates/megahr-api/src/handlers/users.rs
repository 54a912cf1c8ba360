//! Profile and account handlers

use axum::{extract::State, response::Response};
use megahr_application::dto::{ChangePasswordCommand, MyCompany, UpdateProfileCommand};
use megahr_domain::{entities::User, roles::UserRole, value_objects::UserId};

use crate::{
    error::ApiResult,
    extract::{ApiPath, ApiQuery, AuthUser, PaginationQuery, ValidJson},
    response::{message_only, Reply},
    state::AppState,
};

pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Reply<User>> {
    Ok(Reply::ok(state.services.users.profile(&actor).await?))
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidJson(cmd): ValidJson<UpdateProfileCommand>,
) -> ApiResult<Reply<User>> {
    let user = state.services.users.update_profile(&actor, cmd).await?;
    Ok(Reply::ok(user).message("Profile updated successfully."))
}

pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidJson(cmd): ValidJson<ChangePasswordCommand>,
) -> ApiResult<Response> {
    state.services.users.change_password(&actor, cmd).await?;
    Ok(message_only("Password updated successfully."))
}

pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Reply<Vec<User>>> {
    user.require_role(&[UserRole::MegaAdmin])?;
    let page = state.services.users.list(&user.0, pagination.into()).await?;
    Ok(Reply::page(page))
}

pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(user_id): ApiPath<UserId>,
) -> ApiResult<Reply<User>> {
    Ok(Reply::ok(state.services.users.get(&actor, user_id).await?))
}

pub async fn my_companies(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Reply<Vec<MyCompany>>> {
    Ok(Reply::ok(state.services.companies.my_companies(&actor).await?))
}
