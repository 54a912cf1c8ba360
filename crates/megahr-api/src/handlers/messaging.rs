//! Application message thread handlers

use axum::extract::State;
use megahr_application::dto::PostMessageCommand;
use megahr_domain::{entities::Message, value_objects::ApplicationId};

use crate::{
    error::ApiResult,
    extract::{ApiPath, ApiQuery, AuthUser, PaginationQuery, ValidJson},
    response::Reply,
    state::AppState,
};

pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(application_id): ApiPath<ApplicationId>,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Reply<Vec<Message>>> {
    let page = state
        .services
        .messaging
        .list_messages(&actor, application_id, pagination.into())
        .await?;
    Ok(Reply::page(page))
}

pub async fn post_message(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(application_id): ApiPath<ApplicationId>,
    ValidJson(cmd): ValidJson<PostMessageCommand>,
) -> ApiResult<Reply<Message>> {
    let message = state
        .services
        .messaging
        .post_message(&actor, application_id, cmd)
        .await?;
    Ok(Reply::created(message).message("Message sent."))
}
