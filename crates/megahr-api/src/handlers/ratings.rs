//! Rating card template and candidate rating handlers

use axum::{extract::State, response::Response};
use megahr_application::dto::{
    CreateRatingTemplateCommand, RatingTemplateSummary, SubmitRatingCommand,
    UpdateRatingTemplateCommand,
};
use megahr_domain::{
    entities::{CandidateRating, RatingCardTemplate},
    value_objects::{ApplicationId, CompanyId, RatingCardTemplateId},
};

use crate::{
    error::ApiResult,
    extract::{ApiPath, AuthUser, ValidJson},
    response::{message_only, Reply},
    state::AppState,
};

pub async fn create_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<CreateRatingTemplateCommand>,
) -> ApiResult<Reply<RatingCardTemplate>> {
    let template = state
        .services
        .ratings
        .create_template(&actor, company_id, cmd)
        .await?;
    Ok(Reply::created(template).message("Rating card template created successfully."))
}

pub async fn list_templates(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<Vec<RatingTemplateSummary>>> {
    Ok(Reply::ok(
        state.services.ratings.list_templates(&actor, company_id).await?,
    ))
}

pub async fn get_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(template_id): ApiPath<RatingCardTemplateId>,
) -> ApiResult<Reply<RatingCardTemplate>> {
    Ok(Reply::ok(
        state.services.ratings.get_template(&actor, template_id).await?,
    ))
}

pub async fn update_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(template_id): ApiPath<RatingCardTemplateId>,
    ValidJson(cmd): ValidJson<UpdateRatingTemplateCommand>,
) -> ApiResult<Reply<RatingCardTemplate>> {
    let template = state
        .services
        .ratings
        .update_template(&actor, template_id, cmd)
        .await?;
    Ok(Reply::ok(template).message("Rating card template updated successfully."))
}

pub async fn delete_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(template_id): ApiPath<RatingCardTemplateId>,
) -> ApiResult<Response> {
    state
        .services
        .ratings
        .delete_template(&actor, template_id)
        .await?;
    Ok(message_only("Rating card template deleted successfully."))
}

pub async fn submit_rating(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(application_id): ApiPath<ApplicationId>,
    ValidJson(cmd): ValidJson<SubmitRatingCommand>,
) -> ApiResult<Reply<CandidateRating>> {
    let rating = state
        .services
        .ratings
        .submit(&actor, application_id, cmd)
        .await?;
    Ok(Reply::created(rating).message("Rating submitted successfully."))
}

pub async fn list_ratings(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(application_id): ApiPath<ApplicationId>,
) -> ApiResult<Reply<Vec<CandidateRating>>> {
    Ok(Reply::ok(
        state
            .services
            .ratings
            .list_for_application(&actor, application_id)
            .await?,
    ))
}
