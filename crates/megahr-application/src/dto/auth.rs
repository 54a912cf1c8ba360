use chrono::{DateTime, Utc};
use megahr_domain::{entities::User, errors::FieldViolation};
use serde::{Deserialize, Serialize};

use super::validate::{Validate, Violations};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub job_title: Option<String>,
}

impl Validate for RegisterCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .email("email", &self.email)
            .check(
                self.password.chars().count() >= MIN_PASSWORD_LEN,
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long"),
            )
            .length("firstName", &self.first_name, 1, 100)
            .length("lastName", &self.last_name, 1, 100)
            .into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl Validate for LoginCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .email("email", &self.email)
            .required("password", &self.password)
            .into_vec()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileCommand {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub department_name: Option<String>,
}

impl Validate for UpdateProfileCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(name) = &self.first_name {
            v.length("firstName", name, 1, 100);
        }
        if let Some(name) = &self.last_name {
            v.length("lastName", name, 1, 100);
        }
        v.into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordCommand {
    pub current_password: String,
    pub new_password: String,
}

impl Validate for ChangePasswordCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .required("currentPassword", &self.current_password)
            .check(
                self.new_password.chars().count() >= MIN_PASSWORD_LEN,
                "newPassword",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long"),
            )
            .into_vec()
    }
}
