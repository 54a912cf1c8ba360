//! Hiring workflow templates, their per-job snapshots and stage progression

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::candidate::{Application, ApplicationStatus};
use crate::errors::{DomainError, DomainResult, FieldViolation};
use crate::stage_settings::validate_stage_settings;
use crate::value_objects::{
    ApplicationId, CompanyId, JobId, JobWorkflowId, JobWorkflowStageId, StageTemplateId,
    StageTransitionId, UserId, WorkflowTemplateId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageType {
    Applied,
    Screening,
    Review,
    Interview,
    Assessment,
    Task,
    Offer,
    Hired,
    Rejected,
}

/// Input for one template stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageDraft {
    pub name: String,
    pub stage_type: StageType,
    pub order: u32,
    pub settings: Value,
    pub visibility_to_reviewers: bool,
    pub is_default: bool,
    pub can_be_deleted: bool,
}

impl StageDraft {
    pub fn new(name: impl Into<String>, stage_type: StageType, order: u32) -> Self {
        Self {
            name: name.into(),
            stage_type,
            order,
            settings: Value::Object(Default::default()),
            visibility_to_reviewers: false,
            is_default: false,
            can_be_deleted: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStageTemplate {
    pub id: StageTemplateId,
    pub name: String,
    #[serde(rename = "type")]
    pub stage_type: StageType,
    pub order: u32,
    pub settings: Value,
    pub visibility_to_reviewers: bool,
    pub is_default: bool,
    pub can_be_deleted: bool,
}

/// Company-level reusable definition of hiring stages
///
/// Stages are kept sorted by `order`; orders are unique and at least one stage exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplate {
    pub id: WorkflowTemplateId,
    pub company_id: CompanyId,
    pub name: String,
    pub is_default: bool,
    pub stages: Vec<WorkflowStageTemplate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkflowTemplate {
    pub const MAX_STAGES: usize = 20;
    pub const MAX_NAME_LEN: usize = 100;

    pub fn new(
        company_id: CompanyId,
        name: &str,
        is_default: bool,
        stages: Vec<StageDraft>,
    ) -> DomainResult<Self> {
        let name = checked_name(name, "name")?;
        let stages = build_stages(stages)?;
        let now = Utc::now();
        Ok(Self {
            id: WorkflowTemplateId::new(),
            company_id,
            name,
            is_default,
            stages,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.name = checked_name(name, "name")?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Replace the whole stage set; the previous stages are discarded, not merged
    pub fn replace_stages(&mut self, stages: Vec<StageDraft>) -> DomainResult<()> {
        self.stages = build_stages(stages)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn checked_name(name: &str, field: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation(field, "Name is required"));
    }
    if name.chars().count() > WorkflowTemplate::MAX_NAME_LEN {
        return Err(DomainError::validation(
            field,
            format!("Name must be at most {} characters", WorkflowTemplate::MAX_NAME_LEN),
        ));
    }
    Ok(name.to_string())
}

fn build_stages(drafts: Vec<StageDraft>) -> DomainResult<Vec<WorkflowStageTemplate>> {
    if drafts.is_empty() {
        return Err(DomainError::validation(
            "stages",
            "At least one stage is required",
        ));
    }
    if drafts.len() > WorkflowTemplate::MAX_STAGES {
        return Err(DomainError::validation(
            "stages",
            format!("At most {} stages are allowed", WorkflowTemplate::MAX_STAGES),
        ));
    }

    let mut violations = Vec::new();
    let mut orders = HashSet::new();
    for (i, draft) in drafts.iter().enumerate() {
        if let Err(DomainError::ValidationError { reason, .. }) =
            checked_name(&draft.name, "name")
        {
            violations.push(FieldViolation::new(format!("stages.{i}.name"), reason));
        }
        if !orders.insert(draft.order) {
            violations.push(FieldViolation::new(
                format!("stages.{i}.order"),
                format!("Duplicate stage order {}", draft.order),
            ));
        }
        violations.extend(validate_stage_settings(
            &draft.settings,
            &format!("stages.{i}.settings"),
        ));
    }
    DomainError::from_violations(violations)?;

    let mut stages: Vec<WorkflowStageTemplate> = drafts
        .into_iter()
        .map(|d| WorkflowStageTemplate {
            id: StageTemplateId::new(),
            name: d.name.trim().to_string(),
            stage_type: d.stage_type,
            order: d.order,
            settings: normalize_settings(d.settings),
            visibility_to_reviewers: d.visibility_to_reviewers,
            is_default: d.is_default,
            can_be_deleted: d.can_be_deleted,
        })
        .collect();
    stages.sort_by_key(|s| s.order);
    Ok(stages)
}

fn normalize_settings(settings: Value) -> Value {
    match settings {
        Value::Null => Value::Object(Default::default()),
        other => other,
    }
}

/// Stage of a job's workflow snapshot; independently editable after cloning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWorkflowStage {
    pub id: JobWorkflowStageId,
    pub name: String,
    #[serde(rename = "type")]
    pub stage_type: StageType,
    pub order: u32,
    pub settings: Value,
    pub visibility_to_reviewers: bool,
}

/// Per-job snapshot of a workflow template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWorkflow {
    pub id: JobWorkflowId,
    pub job_id: JobId,
    /// Cleared when the source template is deleted
    pub workflow_template_id: Option<WorkflowTemplateId>,
    pub name: String,
    pub stages: Vec<JobWorkflowStage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobWorkflow {
    /// Clone a template's stages for a job
    ///
    /// When `existing` is given its identity is kept but every stage is recreated,
    /// so per-job overrides made on the previous snapshot are dropped.
    pub fn instantiate(
        job_id: JobId,
        job_title: &str,
        template: &WorkflowTemplate,
        existing: Option<&JobWorkflow>,
    ) -> Self {
        let now = Utc::now();
        let stages = template
            .stages
            .iter()
            .map(|s| JobWorkflowStage {
                id: JobWorkflowStageId::new(),
                name: s.name.clone(),
                stage_type: s.stage_type,
                order: s.order,
                settings: s.settings.clone(),
                visibility_to_reviewers: s.visibility_to_reviewers,
            })
            .collect();
        Self {
            id: existing.map_or_else(JobWorkflowId::new, |w| w.id),
            job_id,
            workflow_template_id: Some(template.id),
            name: format!("Workflow for {} (from {})", job_title, template.name),
            stages,
            created_at: existing.map_or(now, |w| w.created_at),
            updated_at: now,
        }
    }

    pub fn stage(&self, id: JobWorkflowStageId) -> Option<&JobWorkflowStage> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn first_stage(&self) -> Option<&JobWorkflowStage> {
        self.stages.first()
    }

    pub fn contains_stage(&self, id: JobWorkflowStageId) -> bool {
        self.stage(id).is_some()
    }

    /// Overwrite one stage's settings wholesale
    pub fn override_stage_settings(
        &mut self,
        stage_id: JobWorkflowStageId,
        settings: Value,
    ) -> DomainResult<&JobWorkflowStage> {
        DomainError::from_violations(validate_stage_settings(&settings, "settings"))?;
        let stage = self
            .stages
            .iter_mut()
            .find(|s| s.id == stage_id)
            .ok_or_else(|| DomainError::not_found("JobWorkflowStage", stage_id))?;
        stage.settings = normalize_settings(settings);
        self.updated_at = Utc::now();
        Ok(stage)
    }

    /// Work out where an application lands for a progress action
    pub fn plan_move(
        &self,
        application: &Application,
        action: ProgressAction,
        target: Option<JobWorkflowStageId>,
    ) -> DomainResult<StageMove> {
        if application.status != ApplicationStatus::Active {
            return Err(DomainError::rule("Only active applications can be moved"));
        }
        let current = application.current_stage_id;
        let position = match current {
            Some(id) => Some(
                self.stages
                    .iter()
                    .position(|s| s.id == id)
                    .ok_or_else(|| {
                        DomainError::rule("Current stage is not part of this job's workflow")
                    })?,
            ),
            None => None,
        };

        let stay = |status| StageMove {
            to_stage_id: current,
            status,
        };
        let to = |index: usize| StageMove {
            to_stage_id: Some(self.stages[index].id),
            status: ApplicationStatus::Active,
        };

        match action {
            ProgressAction::Progress => match position {
                None if !self.stages.is_empty() => Ok(to(0)),
                Some(i) if i + 1 < self.stages.len() => Ok(to(i + 1)),
                _ => Err(DomainError::rule("Application is already at the final stage")),
            },
            ProgressAction::Regress => match position {
                Some(i) if i > 0 => Ok(to(i - 1)),
                Some(_) => Err(DomainError::rule("Application is already at the first stage")),
                None => Err(DomainError::rule("Application has not entered the workflow yet")),
            },
            ProgressAction::Jump => {
                let target = target.ok_or_else(|| {
                    DomainError::validation("targetStageId", "Target stage is required for JUMP")
                })?;
                let index = self
                    .stages
                    .iter()
                    .position(|s| s.id == target)
                    .ok_or_else(|| {
                        DomainError::validation(
                            "targetStageId",
                            "Target stage does not belong to this job's workflow",
                        )
                    })?;
                Ok(to(index))
            }
            ProgressAction::Complete => Ok(stay(ApplicationStatus::Hired)),
            ProgressAction::Cancel => Ok(stay(ApplicationStatus::Rejected)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressAction {
    Progress,
    Regress,
    Jump,
    Complete,
    Cancel,
}

/// Outcome of [`JobWorkflow::plan_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageMove {
    pub to_stage_id: Option<JobWorkflowStageId>,
    pub status: ApplicationStatus,
}

/// Audit record of one application move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTransition {
    pub id: StageTransitionId,
    pub application_id: ApplicationId,
    pub from_stage_id: Option<JobWorkflowStageId>,
    pub to_stage_id: Option<JobWorkflowStageId>,
    pub action: ProgressAction,
    pub moved_by: UserId,
    pub comment: Option<String>,
    pub moved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::CandidateId;
    use serde_json::json;

    fn pipeline() -> WorkflowTemplate {
        WorkflowTemplate::new(
            CompanyId::new(),
            "Engineering",
            false,
            vec![
                StageDraft::new("Interview", StageType::Interview, 2),
                StageDraft::new("Applied", StageType::Applied, 0),
                StageDraft::new("Screen", StageType::Screening, 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn stages_are_sorted_by_order() {
        let names: Vec<_> = pipeline().stages.iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, ["Applied", "Screen", "Interview"]);
    }

    #[test]
    fn empty_stage_list_is_rejected() {
        let err = WorkflowTemplate::new(CompanyId::new(), "x", false, vec![]).unwrap_err();
        assert!(matches!(err, DomainError::ValidationError { ref field, .. } if field == "stages"));
    }

    #[test]
    fn duplicate_orders_and_bad_settings_are_reported_together() {
        let mut bad = StageDraft::new("Two", StageType::Review, 0);
        bad.settings = json!({ "scoringCriteria": [{ "name": "x", "weight": 12 }] });
        let err = WorkflowTemplate::new(
            CompanyId::new(),
            "x",
            false,
            vec![StageDraft::new("One", StageType::Applied, 0), bad],
        )
        .unwrap_err();
        let DomainError::InvalidFields { violations } = err else {
            panic!("expected field violations");
        };
        let paths: Vec<_> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            ["stages.1.order", "stages.1.settings.scoringCriteria.0.weight"]
        );
    }

    #[test]
    fn instantiate_names_and_clones_stages() {
        let template = pipeline();
        let workflow = JobWorkflow::instantiate(JobId::new(), "Rustacean", &template, None);
        assert_eq!(workflow.name, "Workflow for Rustacean (from Engineering)");
        assert_eq!(workflow.stages.len(), 3);
        assert_eq!(workflow.workflow_template_id, Some(template.id));
    }

    #[test]
    fn reassignment_keeps_identity_and_drops_overrides() {
        let template = pipeline();
        let job_id = JobId::new();
        let mut workflow = JobWorkflow::instantiate(job_id, "Rustacean", &template, None);
        let first = workflow.stages[0].id;
        workflow
            .override_stage_settings(first, json!({ "timeLimit": 5 }))
            .unwrap();

        let again = JobWorkflow::instantiate(job_id, "Rustacean", &template, Some(&workflow));
        assert_eq!(again.id, workflow.id);
        assert_ne!(again.stages[0].id, first);
        assert_eq!(again.stages[0].settings, json!({}));
    }

    #[test]
    fn override_rejects_unknown_stage() {
        let mut workflow = JobWorkflow::instantiate(JobId::new(), "t", &pipeline(), None);
        let err = workflow
            .override_stage_settings(JobWorkflowStageId::new(), json!({}))
            .unwrap_err();
        assert!(matches!(err, DomainError::EntityNotFound { .. }));
    }

    #[test]
    fn plan_move_walks_the_pipeline() {
        let workflow = JobWorkflow::instantiate(JobId::new(), "t", &pipeline(), None);
        let mut app = Application::new(CandidateId::new(), workflow.job_id, None);

        let step = workflow.plan_move(&app, ProgressAction::Progress, None).unwrap();
        assert_eq!(step.to_stage_id, Some(workflow.stages[0].id));
        assert!(workflow.plan_move(&app, ProgressAction::Regress, None).is_err());

        app.current_stage_id = Some(workflow.stages[2].id);
        assert!(workflow.plan_move(&app, ProgressAction::Progress, None).is_err());
        let back = workflow.plan_move(&app, ProgressAction::Regress, None).unwrap();
        assert_eq!(back.to_stage_id, Some(workflow.stages[1].id));

        let hired = workflow.plan_move(&app, ProgressAction::Complete, None).unwrap();
        assert_eq!(hired.status, ApplicationStatus::Hired);
        assert_eq!(hired.to_stage_id, app.current_stage_id);
    }

    #[test]
    fn jump_requires_a_stage_of_this_workflow() {
        let workflow = JobWorkflow::instantiate(JobId::new(), "t", &pipeline(), None);
        let app = Application::new(CandidateId::new(), workflow.job_id, None);
        assert!(workflow.plan_move(&app, ProgressAction::Jump, None).is_err());
        assert!(workflow
            .plan_move(&app, ProgressAction::Jump, Some(JobWorkflowStageId::new()))
            .is_err());
        let target = workflow.stages[2].id;
        let jump = workflow
            .plan_move(&app, ProgressAction::Jump, Some(target))
            .unwrap();
        assert_eq!(jump.to_stage_id, Some(target));
    }

    #[test]
    fn closed_applications_do_not_move() {
        let workflow = JobWorkflow::instantiate(JobId::new(), "t", &pipeline(), None);
        let mut app = Application::new(CandidateId::new(), workflow.job_id, None);
        app.status = ApplicationStatus::Rejected;
        assert!(workflow.plan_move(&app, ProgressAction::Progress, None).is_err());
    }
}
