use megahr_domain::{
    entities::AiTone,
    errors::FieldViolation,
    value_objects::CompanyId,
};
use serde::Deserialize;
use serde_json::Value;

use super::validate::{Validate, Violations};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPreferencesCommand {
    pub company_overview: Option<String>,
    pub culture_description: Option<String>,
    pub values_description: Option<String>,
    pub mission_statement: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationPreferencesCommand {
    pub tone: Option<AiTone>,
    pub blocked_team_topics: Option<Vec<String>>,
    pub blocked_candidate_topics: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningConfigCommand {
    pub is_enabled: bool,
    pub guidance: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingConfigCommand {
    pub is_enabled: bool,
    pub preferred_duration_minutes: Option<u32>,
    pub buffer_minutes: Option<u32>,
}

impl Validate for SchedulingConfigCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(minutes) = self.preferred_duration_minutes {
            v.range("preferredDurationMinutes", minutes as i64, 5, 480);
        }
        if let Some(minutes) = self.buffer_minutes {
            v.range("bufferMinutes", minutes as i64, 0, 240);
        }
        v.into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteTakingCommand {
    pub is_enabled: bool,
    #[serde(default)]
    pub share_with_attendees: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInteractionCommand {
    pub company_id: Option<CompanyId>,
    pub interaction_type: String,
    pub prompt: String,
    pub response: Option<String>,
    pub metadata: Option<Value>,
}

impl Validate for LogInteractionCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        Violations::new()
            .length("interactionType", &self.interaction_type, 1, 100)
            .required("prompt", &self.prompt)
            .into_vec()
    }
}
