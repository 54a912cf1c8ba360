//! Workflow template, job workflow and stage progression handlers

use axum::{extract::State, response::Response};
use megahr_application::dto::{
    AssignWorkflowCommand, CreateWorkflowTemplateCommand, ProgressApplicationCommand,
    ProgressOutcome, UpdateStageSettingsCommand, UpdateWorkflowTemplateCommand,
    WorkflowTemplateSummary,
};
use megahr_domain::{
    entities::{JobWorkflow, JobWorkflowStage, StageTransition, WorkflowTemplate},
    value_objects::{ApplicationId, CompanyId, JobId, JobWorkflowStageId, WorkflowTemplateId},
};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiPath, AuthUser, ValidJson},
    response::{message_only, Reply},
    state::AppState,
};

pub async fn create_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<CreateWorkflowTemplateCommand>,
) -> ApiResult<Reply<WorkflowTemplate>> {
    let template = state
        .services
        .workflows
        .create_template(&actor, company_id, cmd)
        .await?;
    Ok(Reply::created(template).message("Workflow template created successfully."))
}

pub async fn list_templates(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<Vec<WorkflowTemplateSummary>>> {
    Ok(Reply::ok(
        state
            .services
            .workflows
            .list_templates(&actor, company_id)
            .await?,
    ))
}

pub async fn get_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(template_id): ApiPath<WorkflowTemplateId>,
) -> ApiResult<Reply<WorkflowTemplate>> {
    Ok(Reply::ok(
        state.services.workflows.get_template(&actor, template_id).await?,
    ))
}

pub async fn update_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(template_id): ApiPath<WorkflowTemplateId>,
    ValidJson(cmd): ValidJson<UpdateWorkflowTemplateCommand>,
) -> ApiResult<Reply<WorkflowTemplate>> {
    let template = state
        .services
        .workflows
        .update_template(&actor, template_id, cmd)
        .await?;
    Ok(Reply::ok(template).message("Workflow template updated successfully."))
}

pub async fn delete_template(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(template_id): ApiPath<WorkflowTemplateId>,
) -> ApiResult<Response> {
    state
        .services
        .workflows
        .delete_template(&actor, template_id)
        .await?;
    Ok(message_only("Workflow template deleted successfully."))
}

pub async fn assign_to_job(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
    ApiJson(cmd): ApiJson<AssignWorkflowCommand>,
) -> ApiResult<Reply<JobWorkflow>> {
    let workflow = state
        .services
        .workflows
        .assign_to_job(&actor, job_id, cmd)
        .await?;
    Ok(Reply::ok(workflow).message("Workflow assigned to job successfully."))
}

pub async fn job_workflow(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(job_id): ApiPath<JobId>,
) -> ApiResult<Reply<JobWorkflow>> {
    Ok(Reply::ok(
        state.services.workflows.job_workflow(&actor, job_id).await?,
    ))
}

pub async fn override_stage_settings(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath((job_id, stage_id)): ApiPath<(JobId, JobWorkflowStageId)>,
    ApiJson(cmd): ApiJson<UpdateStageSettingsCommand>,
) -> ApiResult<Reply<JobWorkflowStage>> {
    let stage = state
        .services
        .workflows
        .override_stage_settings(&actor, job_id, stage_id, cmd)
        .await?;
    Ok(Reply::ok(stage).message("Stage settings updated successfully."))
}

pub async fn progress_application(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(application_id): ApiPath<ApplicationId>,
    ValidJson(cmd): ValidJson<ProgressApplicationCommand>,
) -> ApiResult<Reply<ProgressOutcome>> {
    let outcome = state
        .services
        .workflows
        .progress_application(&actor, application_id, cmd)
        .await?;
    Ok(Reply::ok(outcome).message("Application moved successfully."))
}

pub async fn history(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(application_id): ApiPath<ApplicationId>,
) -> ApiResult<Reply<Vec<StageTransition>>> {
    Ok(Reply::ok(
        state.services.workflows.history(&actor, application_id).await?,
    ))
}
