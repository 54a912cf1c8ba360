use std::sync::Arc;

use megahr_domain::{
    entities::User,
    repositories::{CompanyRepository, UserRepository},
    value_objects::{Page, PageRequest, UserId},
};
use tracing::info;

use crate::access::Actor;
use crate::dto::{ChangePasswordCommand, UpdateProfileCommand};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::ports::PasswordHasher;

pub const REQUIRED_ROLE: &str = "Forbidden: You do not have the required role";

pub struct UserService {
    users: Arc<dyn UserRepository>,
    companies: Arc<dyn CompanyRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        companies: Arc<dyn CompanyRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            companies,
            hasher,
        }
    }

    async fn load(&self, id: UserId) -> ApplicationResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User not found."))
    }

    pub async fn profile(&self, actor: &Actor) -> ApplicationResult<User> {
        self.load(actor.user_id).await
    }

    pub async fn update_profile(
        &self,
        actor: &Actor,
        cmd: UpdateProfileCommand,
    ) -> ApplicationResult<User> {
        let mut user = self.load(actor.user_id).await?;
        if let Some(first) = cmd.first_name {
            user.first_name = first.trim().to_string();
        }
        if let Some(last) = cmd.last_name {
            user.last_name = last.trim().to_string();
        }
        if cmd.job_title.is_some() {
            user.job_title = cmd.job_title;
        }
        if cmd.department_name.is_some() {
            user.department_name = cmd.department_name;
        }
        user.touch();
        self.users.update(&user).await?;
        Ok(user)
    }

    pub async fn change_password(
        &self,
        actor: &Actor,
        cmd: ChangePasswordCommand,
    ) -> ApplicationResult<()> {
        let mut user = self.load(actor.user_id).await?;
        if !self
            .hasher
            .verify(&cmd.current_password, &user.password_hash)
            .await?
        {
            return Err(ApplicationError::bad_request("Incorrect current password."));
        }
        user.password_hash = self.hasher.hash(&cmd.new_password).await?;
        user.touch();
        self.users.update(&user).await?;
        info!(user_id = %user.id, "password changed");
        Ok(())
    }

    /// Every platform user; mega admins only
    pub async fn list(&self, actor: &Actor, page: PageRequest) -> ApplicationResult<Page<User>> {
        if !actor.is_mega_admin() {
            return Err(ApplicationError::forbidden(REQUIRED_ROLE));
        }
        Ok(self.users.list(page).await?)
    }

    /// A user visible to the caller: themselves, a colleague, or anyone for mega admins
    pub async fn get(&self, actor: &Actor, id: UserId) -> ApplicationResult<User> {
        let user = self.load(id).await?;
        if actor.is_mega_admin() || actor.user_id == id {
            return Ok(user);
        }
        for (company, _) in self.companies.list_for_user(actor.user_id).await? {
            if self.companies.find_member(company.id, id).await?.is_some() {
                return Ok(user);
            }
        }
        Err(ApplicationError::forbidden(
            "Forbidden: You can only view users who share a company with you.",
        ))
    }
}
