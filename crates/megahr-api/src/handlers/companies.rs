//! Company, membership, department and location handlers

use axum::{extract::State, response::Response};
use megahr_application::dto::{
    AddMemberCommand, CreateCompanyCommand, DepartmentCommand, LocationCommand, MemberView,
    UpdateCompanyCommand, UpdateMemberCommand,
};
use megahr_domain::{
    entities::{Company, Department, JobLocation},
    roles::UserRole,
    value_objects::{CompanyId, DepartmentId, LocationId, UserId},
};

use crate::{
    error::ApiResult,
    extract::{ApiPath, AuthUser, ValidJson},
    response::{message_only, Reply},
    state::AppState,
};

pub async fn create_company(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(cmd): ValidJson<CreateCompanyCommand>,
) -> ApiResult<Reply<Company>> {
    user.require_role(&[UserRole::Admin, UserRole::MegaAdmin])?;
    let company = state.services.companies.create(&user.0, cmd).await?;
    Ok(Reply::created(company).message("Company created successfully."))
}

pub async fn get_company(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<Company>> {
    Ok(Reply::ok(state.services.companies.get(&actor, company_id).await?))
}

pub async fn update_company(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<UpdateCompanyCommand>,
) -> ApiResult<Reply<Company>> {
    let company = state.services.companies.update(&actor, company_id, cmd).await?;
    Ok(Reply::ok(company).message("Company updated successfully."))
}

// ---- members ----

pub async fn list_members(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<Vec<MemberView>>> {
    Ok(Reply::ok(
        state.services.companies.list_members(&actor, company_id).await?,
    ))
}

pub async fn add_member(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<AddMemberCommand>,
) -> ApiResult<Reply<MemberView>> {
    let member = state.services.companies.add_member(&actor, company_id, cmd).await?;
    Ok(Reply::created(member).message("Member added successfully."))
}

pub async fn update_member(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath((company_id, user_id)): ApiPath<(CompanyId, UserId)>,
    ValidJson(cmd): ValidJson<UpdateMemberCommand>,
) -> ApiResult<Reply<MemberView>> {
    let member = state
        .services
        .companies
        .update_member(&actor, company_id, user_id, cmd)
        .await?;
    Ok(Reply::ok(member).message("Member role updated successfully."))
}

pub async fn remove_member(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath((company_id, user_id)): ApiPath<(CompanyId, UserId)>,
) -> ApiResult<Response> {
    state
        .services
        .companies
        .remove_member(&actor, company_id, user_id)
        .await?;
    Ok(message_only("Member removed successfully."))
}

// ---- departments ----

pub async fn list_departments(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<Vec<Department>>> {
    Ok(Reply::ok(
        state.services.companies.list_departments(&actor, company_id).await?,
    ))
}

pub async fn create_department(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<DepartmentCommand>,
) -> ApiResult<Reply<Department>> {
    let department = state
        .services
        .companies
        .create_department(&actor, company_id, cmd)
        .await?;
    Ok(Reply::created(department).message("Department created successfully."))
}

pub async fn update_department(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath((company_id, department_id)): ApiPath<(CompanyId, DepartmentId)>,
    ValidJson(cmd): ValidJson<DepartmentCommand>,
) -> ApiResult<Reply<Department>> {
    let department = state
        .services
        .companies
        .update_department(&actor, company_id, department_id, cmd)
        .await?;
    Ok(Reply::ok(department).message("Department updated successfully."))
}

pub async fn delete_department(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath((company_id, department_id)): ApiPath<(CompanyId, DepartmentId)>,
) -> ApiResult<Response> {
    state
        .services
        .companies
        .delete_department(&actor, company_id, department_id)
        .await?;
    Ok(message_only("Department deleted successfully."))
}

// ---- locations ----

pub async fn list_locations(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
) -> ApiResult<Reply<Vec<JobLocation>>> {
    Ok(Reply::ok(
        state.services.companies.list_locations(&actor, company_id).await?,
    ))
}

pub async fn create_location(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(company_id): ApiPath<CompanyId>,
    ValidJson(cmd): ValidJson<LocationCommand>,
) -> ApiResult<Reply<JobLocation>> {
    let location = state
        .services
        .companies
        .create_location(&actor, company_id, cmd)
        .await?;
    Ok(Reply::created(location).message("Location created successfully."))
}

pub async fn update_location(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath((company_id, location_id)): ApiPath<(CompanyId, LocationId)>,
    ValidJson(cmd): ValidJson<LocationCommand>,
) -> ApiResult<Reply<JobLocation>> {
    let location = state
        .services
        .companies
        .update_location(&actor, company_id, location_id, cmd)
        .await?;
    Ok(Reply::ok(location).message("Location updated successfully."))
}

pub async fn delete_location(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath((company_id, location_id)): ApiPath<(CompanyId, LocationId)>,
) -> ApiResult<Response> {
    state
        .services
        .companies
        .delete_location(&actor, company_id, location_id)
        .await?;
    Ok(message_only("Location deleted successfully."))
}
