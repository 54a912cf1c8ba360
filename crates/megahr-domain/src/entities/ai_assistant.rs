//! Configuration of the AI hiring assistant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::{AiInteractionId, CompanyId, JobId, MeetingId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPreferences {
    pub company_id: CompanyId,
    pub company_overview: Option<String>,
    pub culture_description: Option<String>,
    pub values_description: Option<String>,
    pub mission_statement: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessPreferences {
    pub fn empty(company_id: CompanyId) -> Self {
        Self {
            company_id,
            company_overview: None,
            culture_description: None,
            values_description: None,
            mission_statement: None,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiTone {
    #[default]
    ProfessionalFormal,
    ProfessionalCasual,
    Friendly,
    Enthusiastic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationPreferences {
    pub company_id: CompanyId,
    pub tone: AiTone,
    pub blocked_team_topics: Vec<String>,
    pub blocked_candidate_topics: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl CommunicationPreferences {
    pub fn defaults(company_id: CompanyId) -> Self {
        Self {
            company_id,
            tone: AiTone::default(),
            blocked_team_topics: Vec::new(),
            blocked_candidate_topics: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobScreeningConfig {
    pub job_id: JobId,
    pub is_enabled: bool,
    pub guidance: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSchedulingConfig {
    pub job_id: JobId,
    pub is_enabled: bool,
    pub preferred_duration_minutes: Option<u32>,
    pub buffer_minutes: Option<u32>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingNoteTakingConfig {
    pub meeting_id: MeetingId,
    pub is_enabled: bool,
    pub share_with_attendees: bool,
    pub updated_by: UserId,
    pub updated_at: DateTime<Utc>,
}

/// Audit entry of one assistant interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInteractionLog {
    pub id: AiInteractionId,
    pub user_id: UserId,
    pub company_id: Option<CompanyId>,
    pub interaction_type: String,
    pub prompt: String,
    pub response: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}
