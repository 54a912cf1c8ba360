//! Workflow templates, per-job workflow snapshots and application progression

use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{
        Application, ApplicationStatus, JobWorkflow, JobWorkflowStage, NotificationType,
        StageDraft, StageTransition, WorkflowTemplate,
    },
    repositories::{ApplicationRepository, JobRepository, WorkflowRepository},
    value_objects::{
        ApplicationId, CompanyId, JobId, JobWorkflowStageId, StageTransitionId,
        WorkflowTemplateId,
    },
};
use tracing::{debug, info};

use super::{NotificationService, Repositories};
use crate::access::{AccessPolicy, Actor, NOT_HIRING};
use crate::dto::{
    AssignWorkflowCommand, CreateWorkflowTemplateCommand, ProgressApplicationCommand,
    ProgressOutcome, StageInput, UpdateStageSettingsCommand, UpdateWorkflowTemplateCommand,
    WorkflowTemplateSummary,
};
use crate::errors::{ApplicationError, ApplicationResult};

pub const TEMPLATE_NOT_FOUND: &str = "Workflow template not found in this company.";
pub const JOB_NOT_FOUND: &str = "Job not found in this company.";
pub const NO_WORKFLOW: &str = "No workflow assigned to this job.";

pub struct WorkflowService {
    workflows: Arc<dyn WorkflowRepository>,
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobRepository>,
    policy: Arc<AccessPolicy>,
    notifications: NotificationService,
}

fn drafts(stages: Vec<StageInput>) -> Vec<StageDraft> {
    stages.into_iter().map(StageInput::into_draft).collect()
}

impl WorkflowService {
    pub fn new(
        repos: &Repositories,
        policy: Arc<AccessPolicy>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            workflows: repos.workflows.clone(),
            applications: repos.applications.clone(),
            jobs: repos.jobs.clone(),
            policy,
            notifications,
        }
    }

    pub async fn create_template(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        cmd: CreateWorkflowTemplateCommand,
    ) -> ApplicationResult<WorkflowTemplate> {
        self.policy.load_company(company_id).await?;
        self.policy.require_recruiting_admin(actor, company_id).await?;

        let template =
            WorkflowTemplate::new(company_id, &cmd.name, cmd.is_default, drafts(cmd.stages))?;
        if template.is_default {
            self.clear_default(company_id, template.id).await?;
        }
        self.workflows.insert_template(&template).await?;
        info!(
            template_id = %template.id,
            company_id = %company_id,
            stages = template.stages.len(),
            "workflow template created"
        );
        Ok(template)
    }

    pub async fn list_templates(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<Vec<WorkflowTemplateSummary>> {
        self.policy.require_recruiting_admin(actor, company_id).await?;
        Ok(self
            .workflows
            .list_templates(company_id)
            .await?
            .iter()
            .map(WorkflowTemplateSummary::from_template)
            .collect())
    }

    pub async fn get_template(
        &self,
        actor: &Actor,
        id: WorkflowTemplateId,
    ) -> ApplicationResult<WorkflowTemplate> {
        let template = self.load_template(id).await?;
        self.policy
            .require_recruiting_admin(actor, template.company_id)
            .await?;
        Ok(template)
    }

    /// Rename, flag or restage a template; a new stage list replaces the old one whole
    pub async fn update_template(
        &self,
        actor: &Actor,
        id: WorkflowTemplateId,
        cmd: UpdateWorkflowTemplateCommand,
    ) -> ApplicationResult<WorkflowTemplate> {
        let mut template = self.get_template(actor, id).await?;
        if let Some(name) = &cmd.name {
            template.rename(name)?;
        }
        if let Some(stages) = cmd.stages {
            template.replace_stages(drafts(stages))?;
        }
        if let Some(is_default) = cmd.is_default {
            template.is_default = is_default;
            if is_default {
                self.clear_default(template.company_id, template.id).await?;
            }
        }
        template.updated_at = Utc::now();
        self.workflows.update_template(&template).await?;
        info!(template_id = %id, "workflow template updated");
        Ok(template)
    }

    pub async fn delete_template(
        &self,
        actor: &Actor,
        id: WorkflowTemplateId,
    ) -> ApplicationResult<()> {
        self.get_template(actor, id).await?;
        self.workflows.delete_template(id).await?;
        info!(template_id = %id, "workflow template deleted");
        Ok(())
    }

    /// Snapshot a template onto a job, replacing any previous snapshot and its overrides
    pub async fn assign_to_job(
        &self,
        actor: &Actor,
        job_id: JobId,
        cmd: AssignWorkflowCommand,
    ) -> ApplicationResult<JobWorkflow> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(JOB_NOT_FOUND))?;
        self.policy.require_recruiting_admin(actor, job.company_id).await?;

        let template = self
            .workflows
            .find_template(cmd.template_id)
            .await?
            .filter(|t| t.company_id == job.company_id)
            .ok_or_else(|| ApplicationError::not_found(TEMPLATE_NOT_FOUND))?;

        let existing = self.workflows.find_job_workflow(job_id).await?;
        let workflow = JobWorkflow::instantiate(job_id, &job.title, &template, existing.as_ref());
        self.workflows.save_job_workflow(&workflow).await?;
        info!(
            job_id = %job_id,
            template_id = %template.id,
            reassigned = existing.is_some(),
            "workflow assigned to job"
        );
        Ok(workflow)
    }

    pub async fn job_workflow(
        &self,
        actor: &Actor,
        job_id: JobId,
    ) -> ApplicationResult<JobWorkflow> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_review_access(actor, job.company_id).await?;
        self.load_job_workflow(job_id).await
    }

    /// Overwrite the settings of one stage of the job's workflow
    pub async fn override_stage_settings(
        &self,
        actor: &Actor,
        job_id: JobId,
        stage_id: JobWorkflowStageId,
        cmd: UpdateStageSettingsCommand,
    ) -> ApplicationResult<JobWorkflowStage> {
        let job = self.policy.load_job(job_id).await?;
        self.policy.require_recruiting_admin(actor, job.company_id).await?;

        let mut workflow = self.load_job_workflow(job_id).await?;
        if !workflow.contains_stage(stage_id) {
            return Err(ApplicationError::not_found(
                "Stage not found in this job's workflow.",
            ));
        }
        let stage = workflow.override_stage_settings(stage_id, cmd.settings)?.clone();
        self.workflows.save_job_workflow(&workflow).await?;
        info!(job_id = %job_id, stage_id = %stage_id, "stage settings overridden");
        Ok(stage)
    }

    /// Move an application through its job's workflow and record the transition
    pub async fn progress_application(
        &self,
        actor: &Actor,
        application_id: ApplicationId,
        cmd: ProgressApplicationCommand,
    ) -> ApplicationResult<ProgressOutcome> {
        let mut application = self.load_application(application_id).await?;
        let job = self.policy.load_job(application.job_id).await?;
        let on_team = self.policy.is_on_hiring_team(actor, job.id).await?;
        if !on_team {
            self.policy
                .require_hiring_access(actor, job.company_id)
                .await
                .map_err(|_| ApplicationError::forbidden(NOT_HIRING))?;
        }

        let workflow = self.load_job_workflow(job.id).await?;
        let planned = workflow.plan_move(&application, cmd.action, cmd.target_stage_id)?;

        let now = Utc::now();
        let transition = StageTransition {
            id: StageTransitionId::new(),
            application_id,
            from_stage_id: application.current_stage_id,
            to_stage_id: planned.to_stage_id,
            action: cmd.action,
            moved_by: actor.user_id,
            comment: cmd.comment.filter(|c| !c.trim().is_empty()),
            moved_at: now,
        };
        application.current_stage_id = planned.to_stage_id;
        application.status = planned.status;
        application.updated_at = now;
        self.applications
            .record_transition(&application, &transition)
            .await?;
        info!(
            application_id = %application_id,
            action = ?cmd.action,
            to_stage = ?planned.to_stage_id,
            "application moved"
        );

        let message = match application.status {
            ApplicationStatus::Hired => format!("A candidate for {} was hired", job.title),
            ApplicationStatus::Rejected => format!("A candidate for {} was rejected", job.title),
            _ => {
                let stage = planned
                    .to_stage_id
                    .and_then(|id| workflow.stage(id))
                    .map_or("a new stage", |s| s.name.as_str());
                format!("A candidate for {} moved to {}", job.title, stage)
            }
        };
        let team = self.jobs.list_hiring_team(job.id).await?;
        self.notifications
            .notify(
                team.iter().map(|m| m.user_id).filter(|id| *id != actor.user_id),
                NotificationType::StageChanged,
                &message,
                Some(format!("/applications/{application_id}")),
            )
            .await;

        Ok(ProgressOutcome {
            application,
            transition,
        })
    }

    pub async fn history(
        &self,
        actor: &Actor,
        application_id: ApplicationId,
    ) -> ApplicationResult<Vec<StageTransition>> {
        let application = self.load_application(application_id).await?;
        let job = self.policy.load_job(application.job_id).await?;
        self.policy.require_review_access(actor, job.company_id).await?;
        let history = self.applications.list_transitions(application_id).await?;
        debug!(application_id = %application_id, moves = history.len(), "transition history read");
        Ok(history)
    }

    async fn clear_default(
        &self,
        company_id: CompanyId,
        keep: WorkflowTemplateId,
    ) -> ApplicationResult<()> {
        for mut other in self.workflows.list_templates(company_id).await? {
            if other.id != keep && other.is_default {
                other.is_default = false;
                self.workflows.update_template(&other).await?;
            }
        }
        Ok(())
    }

    async fn load_template(&self, id: WorkflowTemplateId) -> ApplicationResult<WorkflowTemplate> {
        self.workflows
            .find_template(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Workflow template not found."))
    }

    async fn load_job_workflow(&self, job_id: JobId) -> ApplicationResult<JobWorkflow> {
        self.workflows
            .find_job_workflow(job_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(NO_WORKFLOW))
    }

    async fn load_application(&self, id: ApplicationId) -> ApplicationResult<Application> {
        self.applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Application not found."))
    }
}
