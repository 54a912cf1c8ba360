use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::messaging::MessageTemplate;
use crate::roles::CompanyMemberRole;
use crate::value_objects::{CompanyId, DepartmentId, LocationId, UserId};

/// Tenant company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: CompanyId::new(),
            name: name.into(),
            website: None,
            phone_number: None,
            description: None,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Membership of a user in a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMember {
    pub company_id: CompanyId,
    pub user_id: UserId,
    pub role: CompanyMemberRole,
    pub joined_at: DateTime<Utc>,
}

impl CompanyMember {
    pub fn new(company_id: CompanyId, user_id: UserId, role: CompanyMemberRole) -> Self {
        Self {
            company_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub company_id: CompanyId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobLocation {
    pub id: LocationId,
    pub company_id: CompanyId,
    pub city: String,
    pub state_region: Option<String>,
    pub country: String,
    pub address: Option<String>,
}

/// Public careers-page appearance for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareersPageSettings {
    pub company_id: CompanyId,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub focus_color: String,
    pub hyperlink_color: String,
    pub google_analytics_id: Option<String>,
    pub tracking_pixel_url: Option<String>,
    pub custom_css: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CareersPageSettings {
    pub fn defaults(company_id: CompanyId) -> Self {
        Self {
            company_id,
            logo_url: None,
            primary_color: "#1F2937".to_string(),
            focus_color: "#2563EB".to_string(),
            hyperlink_color: "#2563EB".to_string(),
            google_analytics_id: None,
            tracking_pixel_url: None,
            custom_css: None,
            updated_at: Utc::now(),
        }
    }
}

/// Everything written when a company is created
#[derive(Debug, Clone, PartialEq)]
pub struct CompanySetup {
    pub company: Company,
    pub owner_membership: CompanyMember,
    pub careers_page: CareersPageSettings,
    pub message_templates: Vec<MessageTemplate>,
}

impl CompanySetup {
    /// The creator becomes owner and recruiting admin; required message templates are seeded
    pub fn new(company: Company) -> Self {
        let owner_membership = CompanyMember::new(
            company.id,
            company.owner_id,
            CompanyMemberRole::RecruitingAdmin,
        );
        let careers_page = CareersPageSettings::defaults(company.id);
        let message_templates = MessageTemplate::required_defaults(company.id);
        Self {
            company,
            owner_membership,
            careers_page,
            message_templates,
        }
    }
}
