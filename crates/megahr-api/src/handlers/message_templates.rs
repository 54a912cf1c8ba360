//! Company message template handlers

use axum::{extract::State, response::Response};
use megahr_application::dto::{
    MessageTemplateCommand, MessageTemplatesGrouped, UpdateMessageTemplateCommand,
};
use megahr_domain::{
    entities::MessageTemplate,
    value_objects::{CompanyId, MessageTemplateId},
};

use crate::{
    error::ApiResult,
    extract::{ApiPath, AuthUser, ValidJson},
    response::{message_only, Reply},
    state::AppState,
};

pub async fn list_templates(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<MessageTemplatesGrouped>> {
    Ok(Reply::ok(
        state
            .services
            .messaging
            .list_templates(&actor, company_id)
            .await?,
    ))
}

pub async fn create_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<MessageTemplateCommand>,
) -> ApiResult<Reply<MessageTemplate>> {
    let template = state
        .services
        .messaging
        .create_template(&actor, company_id, cmd)
        .await?;
    Ok(Reply::created(template).message("Message template created successfully."))
}

pub async fn update_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(template_id): ApiPath<MessageTemplateId>,
    ValidJson(cmd): ValidJson<UpdateMessageTemplateCommand>,
) -> ApiResult<Reply<MessageTemplate>> {
    let template = state
        .services
        .messaging
        .update_template(&actor, template_id, cmd)
        .await?;
    Ok(Reply::ok(template).message("Message template updated successfully."))
}

pub async fn delete_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(template_id): ApiPath<MessageTemplateId>,
) -> ApiResult<Response> {
    state
        .services
        .messaging
        .delete_template(&actor, template_id)
        .await?;
    Ok(message_only("Message template deleted successfully."))
}
