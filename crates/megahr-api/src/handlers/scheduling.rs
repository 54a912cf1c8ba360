//! Meeting template and meeting handlers

use axum::{extract::State, response::Response};
use megahr_application::dto::{MeetingTemplateCommand, RsvpCommand, ScheduleMeetingCommand};
use megahr_domain::{
    entities::{Meeting, MeetingTemplate},
    value_objects::{CompanyId, MeetingId, MeetingTemplateId},
};
use serde::Deserialize;

use crate::{
    error::ApiResult,
    extract::{ApiPath, ApiQuery, AuthUser, PaginationQuery, ValidJson},
    response::{message_only, Reply},
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct MyMeetingsQuery {
    pub upcoming: Option<bool>,
}

pub async fn create_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<MeetingTemplateCommand>,
) -> ApiResult<Reply<MeetingTemplate>> {
    let template = state
        .services
        .scheduling
        .create_template(&actor, company_id, cmd)
        .await?;
    Ok(Reply::created(template).message("Meeting template created successfully."))
}

pub async fn list_templates(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<Vec<MeetingTemplate>>> {
    Ok(Reply::ok(
        state
            .services
            .scheduling
            .list_templates(&actor, company_id)
            .await?,
    ))
}

pub async fn update_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(template_id): ApiPath<MeetingTemplateId>,
    ValidJson(cmd): ValidJson<MeetingTemplateCommand>,
) -> ApiResult<Reply<MeetingTemplate>> {
    let template = state
        .services
        .scheduling
        .update_template(&actor, template_id, cmd)
        .await?;
    Ok(Reply::ok(template).message("Meeting template updated successfully."))
}

pub async fn delete_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(template_id): ApiPath<MeetingTemplateId>,
) -> ApiResult<Response> {
    state
        .services
        .scheduling
        .delete_template(&actor, template_id)
        .await?;
    Ok(message_only("Meeting template deleted successfully."))
}

pub async fn schedule_meeting(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidJson(cmd): ValidJson<ScheduleMeetingCommand>,
) -> ApiResult<Reply<Meeting>> {
    let meeting = state.services.scheduling.schedule(&actor, cmd).await?;
    Ok(Reply::created(meeting).message("Meeting scheduled successfully."))
}

pub async fn get_meeting(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(meeting_id): ApiPath<MeetingId>,
) -> ApiResult<Reply<Meeting>> {
    Ok(Reply::ok(
        state.services.scheduling.get(&actor, meeting_id).await?,
    ))
}

pub async fn my_meetings(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiQuery(query): ApiQuery<MyMeetingsQuery>,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Reply<Vec<Meeting>>> {
    let page = state
        .services
        .scheduling
        .my_meetings(&actor, query.upcoming, pagination.into())
        .await?;
    Ok(Reply::page(page))
}

pub async fn rsvp(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(meeting_id): ApiPath<MeetingId>,
    ValidJson(cmd): ValidJson<RsvpCommand>,
) -> ApiResult<Reply<Meeting>> {
    let meeting = state.services.scheduling.rsvp(&actor, meeting_id, cmd).await?;
    Ok(Reply::ok(meeting).message("RSVP recorded."))
}

pub async fn cancel_meeting(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(meeting_id): ApiPath<MeetingId>,
) -> ApiResult<Reply<Meeting>> {
    let meeting = state.services.scheduling.cancel(&actor, meeting_id).await?;
    Ok(Reply::ok(meeting).message("Meeting cancelled."))
}
