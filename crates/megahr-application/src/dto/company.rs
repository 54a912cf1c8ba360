use chrono::{DateTime, Utc};
use megahr_domain::{
    entities::{Company, User},
    errors::FieldViolation,
    roles::CompanyMemberRole,
    value_objects::UserId,
};
use serde::{Deserialize, Serialize};

use super::validate::{Validate, Violations};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyCommand {
    pub name: String,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub description: Option<String>,
}

impl Validate for CreateCompanyCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new().length("name", &self.name, 1, 200).into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyCommand {
    pub name: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub description: Option<String>,
}

impl Validate for UpdateCompanyCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.length("name", name, 1, 200);
        }
        v.into_vec()
    }
}

/// A company seen from one of its members
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyCompany {
    #[serde(flatten)]
    pub company: Company,
    pub member_role: CompanyMemberRole,
    pub is_owner: bool,
}

/// Member role as sent by clients; parsed by the service so bad values are a 400
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberCommand {
    pub email: String,
    pub role: String,
}

impl Validate for AddMemberCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.email("email", &self.email);
        v.parse_enum::<CompanyMemberRole>("role", &self.role);
        v.into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberCommand {
    pub role: String,
}

impl Validate for UpdateMemberCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.parse_enum::<CompanyMemberRole>("role", &self.role);
        v.into_vec()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub user_id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub job_title: Option<String>,
    pub role: CompanyMemberRole,
    pub joined_at: DateTime<Utc>,
}

impl MemberView {
    pub fn new(user: &User, role: CompanyMemberRole, joined_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            job_title: user.job_title.clone(),
            role,
            joined_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCommand {
    pub name: String,
    pub description: Option<String>,
}

impl Validate for DepartmentCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new().length("name", &self.name, 1, 100).into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCommand {
    pub city: String,
    pub state_region: Option<String>,
    pub country: String,
    pub address: Option<String>,
}

impl Validate for LocationCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .length("city", &self.city, 1, 100)
            .length("country", &self.country, 1, 100)
            .into_vec()
    }
}
