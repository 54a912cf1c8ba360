//! Job requisition and hiring-team handlers

use axum::{extract::State, response::Response};
use megahr_application::dto::{
    CreateJobCommand, HiringTeamInput, JobDetails, JobListQuery, UpdateJobCommand,
};
use megahr_domain::{
    entities::{Job, JobHiringMember},
    roles::UserRole,
    value_objects::{CompanyId, JobId, UserId},
};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiPath, ApiQuery, AuthUser, PaginationQuery, ValidJson},
    response::{message_only, Reply},
    state::AppState,
};

pub async fn create_job(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<CreateJobCommand>,
) -> ApiResult<Reply<JobDetails>> {
    user.require_role(&[UserRole::Admin, UserRole::MegaAdmin])?;
    let job = state.services.jobs.create(&user.0, company_id, cmd).await?;
    Ok(Reply::created(job).message("Job created successfully."))
}

pub async fn list_jobs(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ApiQuery(query): ApiQuery<JobListQuery>,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Reply<Vec<Job>>> {
    let page = state
        .services
        .jobs
        .list(&actor, company_id, query.into(), pagination.into())
        .await?;
    Ok(Reply::page(page))
}

pub async fn get_job(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
) -> ApiResult<Reply<JobDetails>> {
    Ok(Reply::ok(state.services.jobs.get(&actor, job_id).await?))
}

pub async fn update_job(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
    ValidJson(cmd): ValidJson<UpdateJobCommand>,
) -> ApiResult<Reply<Job>> {
    let job = state.services.jobs.update(&actor, job_id, cmd).await?;
    Ok(Reply::ok(job).message("Job updated successfully."))
}

pub async fn delete_job(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
) -> ApiResult<Response> {
    state.services.jobs.delete(&actor, job_id).await?;
    Ok(message_only("Job deleted successfully."))
}

pub async fn hiring_team(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
) -> ApiResult<Reply<Vec<JobHiringMember>>> {
    Ok(Reply::ok(state.services.jobs.hiring_team(&actor, job_id).await?))
}

pub async fn add_hiring_member(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
    ApiJson(input): ApiJson<HiringTeamInput>,
) -> ApiResult<Reply<JobHiringMember>> {
    let member = state.services.jobs.add_hiring_member(&actor, job_id, input).await?;
    Ok(Reply::created(member).message("Hiring team member added successfully."))
}

pub async fn remove_hiring_member(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath((job_id, user_id)): ApiPath<(JobId, UserId)>,
) -> ApiResult<Response> {
    state
        .services
        .jobs
        .remove_hiring_member(&actor, job_id, user_id)
        .await?;
    Ok(message_only("Hiring team member removed successfully."))
}
