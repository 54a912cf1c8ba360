//! Candidate, résumé and application handlers

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use megahr_application::dto::{
    CandidateDetails, CandidateWithApplications, CreateCandidateCommand, ResumeUpload,
    UpdateApplicationStatusCommand, UpdateCandidateCommand, Validate,
};
use megahr_domain::{
    entities::{Application, Candidate},
    value_objects::{ApplicationId, CandidateId, CompanyId},
};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiPath, AuthUser, ValidJson},
    response::{message_only, Reply},
    state::AppState,
};

fn non_blank(value: String) -> Option<String> {
    Some(value).filter(|v| !v.trim().is_empty())
}

/// Collect the multipart form into a command; unknown fields are ignored
async fn read_candidate_form(mut multipart: Multipart) -> ApiResult<CreateCandidateCommand> {
    let mut cmd = CreateCandidateCommand::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "resume" {
            let file_name = field.file_name().unwrap_or("resume").to_string();
            let bytes = field.bytes().await?;
            if !bytes.is_empty() {
                cmd.resume = Some(ResumeUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "firstName" => cmd.first_name = value,
            "lastName" => cmd.last_name = value,
            "email" => cmd.email = value,
            "phoneNumber" => cmd.phone_number = non_blank(value),
            "jobId" => cmd.job_id = value,
            "comment" => cmd.comment = non_blank(value),
            _ => tracing::debug!(field = %name, "ignoring unknown form field"),
        }
    }
    Ok(cmd)
}

pub async fn create_candidate(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Reply<CandidateWithApplications>> {
    let cmd = read_candidate_form(multipart?).await?;
    cmd.validate()?;
    let created = state.services.candidates.create(&actor, cmd).await?;
    Ok(Reply::created(created).message("Candidate created."))
}

pub async fn list_candidates(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<Vec<CandidateWithApplications>>> {
    Ok(Reply::ok(
        state
            .services
            .candidates
            .list_for_company(&actor, company_id)
            .await?,
    ))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(candidate_id): ApiPath<CandidateId>,
) -> ApiResult<Reply<CandidateDetails>> {
    Ok(Reply::ok(
        state.services.candidates.get(&actor, candidate_id).await?,
    ))
}

pub async fn update_candidate(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(candidate_id): ApiPath<CandidateId>,
    ValidJson(cmd): ValidJson<UpdateCandidateCommand>,
) -> ApiResult<Reply<Candidate>> {
    let candidate = state
        .services
        .candidates
        .update(&actor, candidate_id, cmd)
        .await?;
    Ok(Reply::ok(candidate).message("Candidate updated."))
}

pub async fn delete_candidate(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(candidate_id): ApiPath<CandidateId>,
) -> ApiResult<Response> {
    state.services.candidates.delete(&actor, candidate_id).await?;
    Ok(message_only("Candidate deleted successfully."))
}

pub async fn download_cv(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(candidate_id): ApiPath<CandidateId>,
) -> ApiResult<Response> {
    let file = state
        .services
        .candidates
        .download_cv(&actor, candidate_id)
        .await?;
    let content_type = mime_guess::from_path(&file.file_name).first_or_octet_stream();
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.file_name.replace('"', "")
    );
    let headers = [
        (header::CONTENT_TYPE, content_type.essence_str().to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, file.bytes).into_response())
}

pub async fn get_application(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(application_id): ApiPath<ApplicationId>,
) -> ApiResult<Reply<Application>> {
    Ok(Reply::ok(
        state
            .services
            .candidates
            .get_application(&actor, application_id)
            .await?,
    ))
}

pub async fn update_application_status(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(application_id): ApiPath<ApplicationId>,
    ApiJson(cmd): ApiJson<UpdateApplicationStatusCommand>,
) -> ApiResult<Reply<Application>> {
    let application = state
        .services
        .candidates
        .update_application_status(&actor, application_id, cmd)
        .await?;
    Ok(Reply::ok(application).message("Application status updated."))
}
