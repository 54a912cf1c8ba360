//! Question bank and question set handlers

use axum::{extract::State, response::Response};
use megahr_application::dto::{
    QuestionCommand, QuestionSetCommand, UpdateQuestionCommand, UpdateQuestionSetCommand,
};
use megahr_domain::{
    entities::{Question, QuestionSet},
    value_objects::{CompanyId, QuestionId, QuestionSetId},
};

use crate::{
    error::ApiResult,
    extract::{ApiPath, AuthUser, ValidJson},
    response::{message_only, Reply},
    state::AppState,
};

pub async fn list_questions(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<Vec<Question>>> {
    Ok(Reply::ok(
        state
            .services
            .questions
            .list_questions(&actor, company_id)
            .await?,
    ))
}

pub async fn create_question(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<QuestionCommand>,
) -> ApiResult<Reply<Question>> {
    let question = state
        .services
        .questions
        .create_question(&actor, company_id, cmd)
        .await?;
    Ok(Reply::created(question).message("Question created successfully."))
}

pub async fn get_question(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(question_id): ApiPath<QuestionId>,
) -> ApiResult<Reply<Question>> {
    Ok(Reply::ok(
        state.services.questions.get_question(&actor, question_id).await?,
    ))
}

pub async fn update_question(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(question_id): ApiPath<QuestionId>,
    ValidJson(cmd): ValidJson<UpdateQuestionCommand>,
) -> ApiResult<Reply<Question>> {
    let question = state
        .services
        .questions
        .update_question(&actor, question_id, cmd)
        .await?;
    Ok(Reply::ok(question).message("Question updated successfully."))
}

pub async fn delete_question(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(question_id): ApiPath<QuestionId>,
) -> ApiResult<Response> {
    state
        .services
        .questions
        .delete_question(&actor, question_id)
        .await?;
    Ok(message_only("Question deleted successfully."))
}

pub async fn list_sets(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<Vec<QuestionSet>>> {
    Ok(Reply::ok(
        state.services.questions.list_sets(&actor, company_id).await?,
    ))
}

pub async fn create_set(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<QuestionSetCommand>,
) -> ApiResult<Reply<QuestionSet>> {
    let set = state
        .services
        .questions
        .create_set(&actor, company_id, cmd)
        .await?;
    Ok(Reply::created(set).message("Question set created successfully."))
}

pub async fn get_set(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(set_id): ApiPath<QuestionSetId>,
) -> ApiResult<Reply<QuestionSet>> {
    Ok(Reply::ok(state.services.questions.get_set(&actor, set_id).await?))
}

pub async fn update_set(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(set_id): ApiPath<QuestionSetId>,
    ValidJson(cmd): ValidJson<UpdateQuestionSetCommand>,
) -> ApiResult<Reply<QuestionSet>> {
    let set = state
        .services
        .questions
        .update_set(&actor, set_id, cmd)
        .await?;
    Ok(Reply::ok(set).message("Question set updated successfully."))
}

pub async fn delete_set(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(set_id): ApiPath<QuestionSetId>,
) -> ApiResult<Response> {
    state.services.questions.delete_set(&actor, set_id).await?;
    Ok(message_only("Question set deleted successfully."))
}
