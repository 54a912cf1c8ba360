//! Careers page settings and the public job board

use axum::extract::State;
use megahr_application::dto::{CareersPageView, JobListQuery, PublicJob, UpdateCareersPageCommand};
use megahr_domain::value_objects::{CompanyId, JobId};

use crate::{
    error::ApiResult,
    extract::{ApiPath, ApiQuery, AuthUser, PaginationQuery, ValidJson},
    response::Reply,
    state::AppState,
};

pub async fn settings(
    State(state): State<AppState>,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<CareersPageView>> {
    Ok(Reply::ok(
        state.services.careers_page.settings(company_id).await?,
    ))
}

pub async fn update_settings(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<UpdateCareersPageCommand>,
) -> ApiResult<Reply<CareersPageView>> {
    let view = state
        .services
        .careers_page
        .update(&actor, company_id, cmd)
        .await?;
    Ok(Reply::ok(view).message("Careers page updated successfully."))
}

pub async fn public_jobs(
    State(state): State<AppState>,
    ApiPath(company_id): ApiPath<CompanyId>,
    ApiQuery(query): ApiQuery<JobListQuery>,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Reply<Vec<PublicJob>>> {
    let page = state
        .services
        .careers_page
        .public_jobs(company_id, query, pagination.into())
        .await?;
    Ok(Reply::page(page))
}

pub async fn public_job(
    State(state): State<AppState>,
    ApiPath(job_id): ApiPath<JobId>,
) -> ApiResult<Reply<PublicJob>> {
    Ok(Reply::ok(state.services.careers_page.public_job(job_id).await?))
}
