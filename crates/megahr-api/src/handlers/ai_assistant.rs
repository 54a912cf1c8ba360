//! AI assistant ("Megan") configuration and interaction log handlers

use axum::extract::State;
use megahr_application::dto::{
    BusinessPreferencesCommand, CommunicationPreferencesCommand, LogInteractionCommand,
    NoteTakingCommand, SchedulingConfigCommand, ScreeningConfigCommand,
};
use megahr_domain::{
    entities::{
        AiInteractionLog, BusinessPreferences, CommunicationPreferences, JobSchedulingConfig,
        JobScreeningConfig, MeetingNoteTakingConfig,
    },
    value_objects::{CompanyId, JobId, MeetingId},
};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiPath, ApiQuery, AuthUser, PaginationQuery, ValidJson},
    response::Reply,
    state::AppState,
};

pub async fn business_preferences(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<BusinessPreferences>> {
    Ok(Reply::ok(
        state
            .services
            .ai_assistant
            .business_preferences(&actor, company_id)
            .await?,
    ))
}

pub async fn update_business_preferences(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ApiJson(cmd): ApiJson<BusinessPreferencesCommand>,
) -> ApiResult<Reply<BusinessPreferences>> {
    let prefs = state
        .services
        .ai_assistant
        .update_business_preferences(&actor, company_id, cmd)
        .await?;
    Ok(Reply::ok(prefs).message("Business preferences updated."))
}

pub async fn communication_preferences(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<CommunicationPreferences>> {
    Ok(Reply::ok(
        state
            .services
            .ai_assistant
            .communication_preferences(&actor, company_id)
            .await?,
    ))
}

pub async fn update_communication_preferences(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ApiJson(cmd): ApiJson<CommunicationPreferencesCommand>,
) -> ApiResult<Reply<CommunicationPreferences>> {
    let prefs = state
        .services
        .ai_assistant
        .update_communication_preferences(&actor, company_id, cmd)
        .await?;
    Ok(Reply::ok(prefs).message("Communication preferences updated."))
}

pub async fn screening_config(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
) -> ApiResult<Reply<JobScreeningConfig>> {
    Ok(Reply::ok(
        state
            .services
            .ai_assistant
            .screening_config(&actor, job_id)
            .await?,
    ))
}

pub async fn update_screening_config(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
    ApiJson(cmd): ApiJson<ScreeningConfigCommand>,
) -> ApiResult<Reply<JobScreeningConfig>> {
    let config = state
        .services
        .ai_assistant
        .update_screening_config(&actor, job_id, cmd)
        .await?;
    Ok(Reply::ok(config).message("Screening configuration updated."))
}

pub async fn scheduling_config(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
) -> ApiResult<Reply<JobSchedulingConfig>> {
    Ok(Reply::ok(
        state
            .services
            .ai_assistant
            .scheduling_config(&actor, job_id)
            .await?,
    ))
}

pub async fn update_scheduling_config(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
    ValidJson(cmd): ValidJson<SchedulingConfigCommand>,
) -> ApiResult<Reply<JobSchedulingConfig>> {
    let config = state
        .services
        .ai_assistant
        .update_scheduling_config(&actor, job_id, cmd)
        .await?;
    Ok(Reply::ok(config).message("Scheduling configuration updated."))
}

pub async fn note_taking_config(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(meeting_id): ApiPath<MeetingId>,
) -> ApiResult<Reply<MeetingNoteTakingConfig>> {
    Ok(Reply::ok(
        state
            .services
            .ai_assistant
            .note_taking_config(&actor, meeting_id)
            .await?,
    ))
}

pub async fn update_note_taking_config(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(meeting_id): ApiPath<MeetingId>,
    ApiJson(cmd): ApiJson<NoteTakingCommand>,
) -> ApiResult<Reply<MeetingNoteTakingConfig>> {
    let config = state
        .services
        .ai_assistant
        .update_note_taking_config(&actor, meeting_id, cmd)
        .await?;
    Ok(Reply::ok(config).message("Note-taking configuration updated."))
}

pub async fn log_interaction(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidJson(cmd): ValidJson<LogInteractionCommand>,
) -> ApiResult<Reply<AiInteractionLog>> {
    let entry = state
        .services
        .ai_assistant
        .log_interaction(&actor, cmd)
        .await?;
    Ok(Reply::created(entry))
}

pub async fn interactions(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Reply<Vec<AiInteractionLog>>> {
    let page = state
        .services
        .ai_assistant
        .interactions(&actor, pagination.into())
        .await?;
    Ok(Reply::page(page))
}
