//! In-Memory Workflow Repository Implementation
//!
//! Templates and job workflows are stored whole, so replacing their stage sets is a
//! single write under the store lock.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use megahr_domain::{
    entities::{JobWorkflow, WorkflowTemplate},
    errors::DomainResult,
    repositories::WorkflowRepository,
    value_objects::{CompanyId, JobId, WorkflowTemplateId},
};

use super::store::{insert_unique, remove_existing, replace_existing, MemoryStore};

/// Thread-safe in-memory implementation of WorkflowRepository
#[derive(Debug, Clone)]
pub struct InMemoryWorkflowRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryWorkflowRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn insert_template(&self, template: &WorkflowTemplate) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(
                &mut t.workflow_templates,
                template.id,
                template.clone(),
                "WorkflowTemplate",
                "id",
            )
        })?;
        Ok(())
    }

    async fn update_template(&self, template: &WorkflowTemplate) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(
                &mut t.workflow_templates,
                template.id,
                template.clone(),
                "WorkflowTemplate",
                template.id,
            )
        })?;
        Ok(())
    }

    async fn delete_template(&self, id: WorkflowTemplateId) -> DomainResult<()> {
        self.store.write(|t| {
            remove_existing(&mut t.workflow_templates, &id, "WorkflowTemplate", id)?;
            for workflow in t
                .job_workflows
                .values_mut()
                .filter(|w| w.workflow_template_id == Some(id))
            {
                workflow.workflow_template_id = None;
            }
            Ok(())
        })?;
        Ok(())
    }

    async fn find_template(
        &self,
        id: WorkflowTemplateId,
    ) -> DomainResult<Option<WorkflowTemplate>> {
        Ok(self.store.read(|t| t.workflow_templates.get(&id).cloned()))
    }

    async fn list_templates(&self, company_id: CompanyId) -> DomainResult<Vec<WorkflowTemplate>> {
        let mut templates: Vec<WorkflowTemplate> = self.store.read(|t| {
            t.workflow_templates
                .values()
                .filter(|w| w.company_id == company_id)
                .cloned()
                .collect()
        });
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn find_job_workflow(&self, job_id: JobId) -> DomainResult<Option<JobWorkflow>> {
        Ok(self.store.read(|t| t.job_workflows.get(&job_id).cloned()))
    }

    async fn save_job_workflow(&self, workflow: &JobWorkflow) -> DomainResult<()> {
        self.store.write(|t| {
            let first = workflow.first_stage().map(|s| s.id);
            let now = Utc::now();
            for application in t.applications.values_mut() {
                let stale = application
                    .current_stage_id
                    .is_some_and(|s| !workflow.contains_stage(s));
                if application.job_id == workflow.job_id && stale {
                    application.current_stage_id = first;
                    application.updated_at = now;
                }
            }
            t.job_workflows.insert(workflow.job_id, workflow.clone());
            Ok(())
        })?;
        Ok(())
    }
}
