use chrono::{DateTime, Utc};
use megahr_domain::{
    entities::{
        Application, ProgressAction, StageDraft, StageTransition, StageType, WorkflowTemplate,
    },
    errors::FieldViolation,
    value_objects::{JobWorkflowStageId, WorkflowTemplateId},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validate::{Validate, Violations};

pub const MAX_COMMENT_LEN: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageInput {
    pub name: String,
    #[serde(rename = "type")]
    pub stage_type: StageType,
    pub order: i64,
    pub settings: Option<Value>,
    #[serde(default)]
    pub visibility_to_reviewers: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub can_be_deleted: bool,
}

fn default_true() -> bool {
    true
}

impl StageInput {
    pub fn into_draft(self) -> StageDraft {
        let mut draft = StageDraft::new(self.name, self.stage_type, self.order.max(0) as u32);
        if let Some(settings) = self.settings {
            draft.settings = settings;
        }
        draft.visibility_to_reviewers = self.visibility_to_reviewers;
        draft.is_default = self.is_default;
        draft.can_be_deleted = self.can_be_deleted;
        draft
    }
}

fn stage_violations(v: &mut Violations, stages: &[StageInput]) {
    v.check(!stages.is_empty(), "stages", "At least one stage is required")
        .check(
            stages.len() <= WorkflowTemplate::MAX_STAGES,
            "stages",
            format!("At most {} stages are allowed", WorkflowTemplate::MAX_STAGES),
        );
    for (i, stage) in stages.iter().enumerate() {
        v.length(&format!("stages.{i}.name"), &stage.name, 1, WorkflowTemplate::MAX_NAME_LEN)
            .check(
                stage.order >= 0,
                format!("stages.{i}.order"),
                "Order must be a non-negative integer",
            );
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflowTemplateCommand {
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    pub stages: Vec<StageInput>,
}

impl Validate for CreateWorkflowTemplateCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.length("name", &self.name, 1, WorkflowTemplate::MAX_NAME_LEN);
        stage_violations(&mut v, &self.stages);
        v.into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkflowTemplateCommand {
    pub name: Option<String>,
    pub is_default: Option<bool>,
    pub stages: Option<Vec<StageInput>>,
}

impl Validate for UpdateWorkflowTemplateCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.length("name", name, 1, WorkflowTemplate::MAX_NAME_LEN);
        }
        if let Some(stages) = &self.stages {
            stage_violations(&mut v, stages);
        }
        v.into_vec()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePreview {
    pub name: String,
    #[serde(rename = "type")]
    pub stage_type: StageType,
    pub order: u32,
}

/// List entry for a workflow template
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplateSummary {
    pub id: WorkflowTemplateId,
    pub name: String,
    pub is_default: bool,
    pub stage_count: usize,
    pub stages: Vec<StagePreview>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkflowTemplateSummary {
    pub const PREVIEW_LEN: usize = 3;

    pub fn from_template(template: &WorkflowTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name.clone(),
            is_default: template.is_default,
            stage_count: template.stages.len(),
            stages: template
                .stages
                .iter()
                .take(Self::PREVIEW_LEN)
                .map(|s| StagePreview {
                    name: s.name.clone(),
                    stage_type: s.stage_type,
                    order: s.order,
                })
                .collect(),
            created_at: template.created_at,
            updated_at: template.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignWorkflowCommand {
    pub template_id: WorkflowTemplateId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStageSettingsCommand {
    pub settings: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressApplicationCommand {
    pub action: ProgressAction,
    pub target_stage_id: Option<JobWorkflowStageId>,
    pub comment: Option<String>,
}

impl Validate for ProgressApplicationCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.check(
            self.action != ProgressAction::Jump || self.target_stage_id.is_some(),
            "targetStageId",
            "Target stage is required for JUMP",
        );
        if let Some(comment) = &self.comment {
            v.length("comment", comment, 0, MAX_COMMENT_LEN);
        }
        v.into_vec()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOutcome {
    pub application: Application,
    pub transition: StageTransition,
}
