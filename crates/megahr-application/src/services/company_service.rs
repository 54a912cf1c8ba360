//! Companies, their members, departments and locations

use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{Company, CompanyMember, CompanySetup, Department, JobLocation},
    repositories::{CompanyRepository, OrganizationRepository, UserRepository},
    roles::CompanyMemberRole,
    value_objects::{CompanyId, DepartmentId, LocationId, UserId},
};
use tracing::info;

use super::Repositories;
use crate::access::{AccessPolicy, Actor};
use crate::dto::{
    AddMemberCommand, CreateCompanyCommand, DepartmentCommand, LocationCommand, MemberView,
    MyCompany, UpdateCompanyCommand, UpdateMemberCommand, Violations,
};
use crate::errors::{ApplicationError, ApplicationResult};

pub struct CompanyService {
    companies: Arc<dyn CompanyRepository>,
    organization: Arc<dyn OrganizationRepository>,
    users: Arc<dyn UserRepository>,
    policy: Arc<AccessPolicy>,
}

fn parse_role(value: &str) -> ApplicationResult<CompanyMemberRole> {
    let mut v = Violations::new();
    match v.parse_enum::<CompanyMemberRole>("role", value) {
        Some(role) => Ok(role),
        None => Err(ApplicationError::Validation {
            message: format!("Invalid role: {value}"),
            errors: v.into_vec(),
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl CompanyService {
    pub fn new(repos: &Repositories, policy: Arc<AccessPolicy>) -> Self {
        Self {
            companies: repos.companies.clone(),
            organization: repos.organization.clone(),
            users: repos.users.clone(),
            policy,
        }
    }

    /// Create a company owned by the caller, who becomes its first recruiting admin
    pub async fn create(
        &self,
        actor: &Actor,
        cmd: CreateCompanyCommand,
    ) -> ApplicationResult<Company> {
        let mut company = Company::new(cmd.name.trim(), actor.user_id);
        company.website = non_empty(cmd.website);
        company.phone_number = non_empty(cmd.phone_number);
        company.description = non_empty(cmd.description);

        self.companies.create(&CompanySetup::new(company.clone())).await?;
        info!(company_id = %company.id, owner_id = %actor.user_id, "company created");
        Ok(company)
    }

    pub async fn get(&self, actor: &Actor, id: CompanyId) -> ApplicationResult<Company> {
        let company = self.policy.load_company(id).await?;
        self.policy.require_member(actor, id).await?;
        Ok(company)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: CompanyId,
        cmd: UpdateCompanyCommand,
    ) -> ApplicationResult<Company> {
        let mut company = self.policy.load_company(id).await?;
        self.policy.require_company_admin(actor, &company).await?;

        if let Some(name) = cmd.name {
            company.name = name.trim().to_string();
        }
        if cmd.website.is_some() {
            company.website = non_empty(cmd.website);
        }
        if cmd.phone_number.is_some() {
            company.phone_number = non_empty(cmd.phone_number);
        }
        if cmd.description.is_some() {
            company.description = non_empty(cmd.description);
        }
        company.updated_at = Utc::now();
        self.companies.update(&company).await?;
        Ok(company)
    }

    /// Companies the caller belongs to, with the caller's role in each
    pub async fn my_companies(&self, actor: &Actor) -> ApplicationResult<Vec<MyCompany>> {
        Ok(self
            .companies
            .list_for_user(actor.user_id)
            .await?
            .into_iter()
            .map(|(company, member)| MyCompany {
                is_owner: company.owner_id == actor.user_id,
                company,
                member_role: member.role,
            })
            .collect())
    }

    async fn member_view(&self, member: &CompanyMember) -> ApplicationResult<Option<MemberView>> {
        Ok(self
            .users
            .find_by_id(member.user_id)
            .await?
            .map(|user| MemberView::new(&user, member.role, member.joined_at)))
    }

    pub async fn list_members(
        &self,
        actor: &Actor,
        id: CompanyId,
    ) -> ApplicationResult<Vec<MemberView>> {
        self.policy.load_company(id).await?;
        self.policy.require_member(actor, id).await?;

        let mut views = Vec::new();
        for member in self.companies.list_members(id).await? {
            if let Some(view) = self.member_view(&member).await? {
                views.push(view);
            }
        }
        Ok(views)
    }

    pub async fn add_member(
        &self,
        actor: &Actor,
        id: CompanyId,
        cmd: AddMemberCommand,
    ) -> ApplicationResult<MemberView> {
        let company = self.policy.load_company(id).await?;
        self.policy.require_company_admin(actor, &company).await?;
        let role = parse_role(&cmd.role)?;

        let user = self
            .users
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User to be added not found."))?;
        if self.companies.find_member(id, user.id).await?.is_some() {
            return Err(ApplicationError::conflict(
                "User is already a member of this company.",
            ));
        }

        let member = CompanyMember::new(id, user.id, role);
        self.companies.add_member(&member).await?;
        info!(company_id = %id, user_id = %user.id, role = ?role, "member added");
        Ok(MemberView::new(&user, role, member.joined_at))
    }

    pub async fn update_member(
        &self,
        actor: &Actor,
        id: CompanyId,
        user_id: UserId,
        cmd: UpdateMemberCommand,
    ) -> ApplicationResult<MemberView> {
        let company = self.policy.load_company(id).await?;
        self.policy.require_company_admin(actor, &company).await?;
        let role = parse_role(&cmd.role)?;

        let mut member = self.find_member(id, user_id).await?;
        if company.owner_id == user_id && role != CompanyMemberRole::RecruitingAdmin {
            return Err(ApplicationError::bad_request(
                "The company owner must remain a Recruiting Admin.",
            ));
        }
        member.role = role;
        self.companies.update_member(&member).await?;
        self.member_view(&member)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User not found."))
    }

    pub async fn remove_member(
        &self,
        actor: &Actor,
        id: CompanyId,
        user_id: UserId,
    ) -> ApplicationResult<()> {
        let company = self.policy.load_company(id).await?;
        self.policy.require_company_admin(actor, &company).await?;
        if company.owner_id == user_id {
            return Err(ApplicationError::bad_request(
                "The company owner cannot be removed.",
            ));
        }
        self.find_member(id, user_id).await?;
        self.companies.remove_member(id, user_id).await?;
        info!(company_id = %id, user_id = %user_id, "member removed");
        Ok(())
    }

    async fn find_member(
        &self,
        id: CompanyId,
        user_id: UserId,
    ) -> ApplicationResult<CompanyMember> {
        self.companies
            .find_member(id, user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User is not a member of this company."))
    }

    // Departments

    pub async fn list_departments(
        &self,
        actor: &Actor,
        id: CompanyId,
    ) -> ApplicationResult<Vec<Department>> {
        self.policy.load_company(id).await?;
        self.policy.require_member(actor, id).await?;
        Ok(self.organization.list_departments(id).await?)
    }

    pub async fn create_department(
        &self,
        actor: &Actor,
        id: CompanyId,
        cmd: DepartmentCommand,
    ) -> ApplicationResult<Department> {
        let company = self.policy.load_company(id).await?;
        self.policy.require_company_admin(actor, &company).await?;
        let department = Department {
            id: DepartmentId::new(),
            company_id: id,
            name: cmd.name.trim().to_string(),
            description: non_empty(cmd.description),
        };
        self.organization.save_department(&department).await?;
        Ok(department)
    }

    pub async fn update_department(
        &self,
        actor: &Actor,
        id: CompanyId,
        department_id: DepartmentId,
        cmd: DepartmentCommand,
    ) -> ApplicationResult<Department> {
        let company = self.policy.load_company(id).await?;
        self.policy.require_company_admin(actor, &company).await?;
        let mut department = self.find_department(id, department_id).await?;
        department.name = cmd.name.trim().to_string();
        department.description = non_empty(cmd.description);
        self.organization.save_department(&department).await?;
        Ok(department)
    }

    pub async fn delete_department(
        &self,
        actor: &Actor,
        id: CompanyId,
        department_id: DepartmentId,
    ) -> ApplicationResult<()> {
        let company = self.policy.load_company(id).await?;
        self.policy.require_company_admin(actor, &company).await?;
        self.find_department(id, department_id).await?;
        Ok(self.organization.delete_department(department_id).await?)
    }

    async fn find_department(
        &self,
        company_id: CompanyId,
        id: DepartmentId,
    ) -> ApplicationResult<Department> {
        self.organization
            .find_department(id)
            .await?
            .filter(|d| d.company_id == company_id)
            .ok_or_else(|| ApplicationError::not_found("Department not found."))
    }

    // Locations

    pub async fn list_locations(
        &self,
        actor: &Actor,
        id: CompanyId,
    ) -> ApplicationResult<Vec<JobLocation>> {
        self.policy.load_company(id).await?;
        self.policy.require_member(actor, id).await?;
        Ok(self.organization.list_locations(id).await?)
    }

    pub async fn create_location(
        &self,
        actor: &Actor,
        id: CompanyId,
        cmd: LocationCommand,
    ) -> ApplicationResult<JobLocation> {
        let company = self.policy.load_company(id).await?;
        self.policy.require_company_admin(actor, &company).await?;
        let location = JobLocation {
            id: LocationId::new(),
            company_id: id,
            city: cmd.city.trim().to_string(),
            state_region: non_empty(cmd.state_region),
            country: cmd.country.trim().to_string(),
            address: non_empty(cmd.address),
        };
        self.organization.save_location(&location).await?;
        Ok(location)
    }

    pub async fn update_location(
        &self,
        actor: &Actor,
        id: CompanyId,
        location_id: LocationId,
        cmd: LocationCommand,
    ) -> ApplicationResult<JobLocation> {
        let company = self.policy.load_company(id).await?;
        self.policy.require_company_admin(actor, &company).await?;
        let mut location = self
            .organization
            .find_location(location_id)
            .await?
            .filter(|l| l.company_id == id)
            .ok_or_else(|| ApplicationError::not_found("Location not found."))?;
        location.city = cmd.city.trim().to_string();
        location.state_region = non_empty(cmd.state_region);
        location.country = cmd.country.trim().to_string();
        location.address = non_empty(cmd.address);
        self.organization.save_location(&location).await?;
        Ok(location)
    }

    pub async fn delete_location(
        &self,
        actor: &Actor,
        id: CompanyId,
        location_id: LocationId,
    ) -> ApplicationResult<()> {
        let company = self.policy.load_company(id).await?;
        self.policy.require_company_admin(actor, &company).await?;
        self.organization
            .find_location(location_id)
            .await?
            .filter(|l| l.company_id == id)
            .ok_or_else(|| ApplicationError::not_found("Location not found."))?;
        Ok(self.organization.delete_location(location_id).await?)
    }
}
