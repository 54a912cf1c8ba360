//! Rating card templates and candidate scorecards

use std::sync::Arc;

use chrono::Utc;
use megahr_domain::{
    entities::{
        Application, CandidateRating, CategoryScore, NotificationType, RatingCardTemplate, Score,
    },
    errors::{DomainError, FieldViolation},
    repositories::{ApplicationRepository, JobRepository, RatingRepository, WorkflowRepository},
    value_objects::{ApplicationId, CandidateRatingId, CompanyId, RatingCardTemplateId},
};
use tracing::info;

use super::{NotificationService, Repositories};
use crate::access::{AccessPolicy, Actor};
use crate::dto::{
    CategoryInput, CategoryScoreInput, CreateRatingTemplateCommand, RatingTemplateSummary,
    SubmitRatingCommand, UpdateRatingTemplateCommand,
};
use crate::errors::{ApplicationError, ApplicationResult};

pub const CANNOT_RATE: &str = "Forbidden: You are not allowed to rate candidates for this job.";

pub struct RatingService {
    ratings: Arc<dyn RatingRepository>,
    applications: Arc<dyn ApplicationRepository>,
    workflows: Arc<dyn WorkflowRepository>,
    jobs: Arc<dyn JobRepository>,
    policy: Arc<AccessPolicy>,
    notifications: NotificationService,
}

impl RatingService {
    pub fn new(
        repos: &Repositories,
        policy: Arc<AccessPolicy>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            ratings: repos.ratings.clone(),
            applications: repos.applications.clone(),
            workflows: repos.workflows.clone(),
            jobs: repos.jobs.clone(),
            policy,
            notifications,
        }
    }

    pub async fn create_template(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        cmd: CreateRatingTemplateCommand,
    ) -> ApplicationResult<RatingCardTemplate> {
        self.policy.load_company(company_id).await?;
        self.policy.require_recruiting_admin(actor, company_id).await?;

        let template = RatingCardTemplate::new(
            company_id,
            &cmd.name,
            cmd.description,
            cmd.card_type,
            cmd.categories.into_iter().map(CategoryInput::into_draft).collect(),
            actor.user_id,
        )?;
        self.ratings.insert_template(&template).await?;
        info!(template_id = %template.id, company_id = %company_id, "rating template created");
        Ok(template)
    }

    pub async fn list_templates(
        &self,
        actor: &Actor,
        company_id: CompanyId,
    ) -> ApplicationResult<Vec<RatingTemplateSummary>> {
        self.policy.require_review_access(actor, company_id).await?;
        Ok(self
            .ratings
            .list_templates(company_id)
            .await?
            .iter()
            .map(RatingTemplateSummary::from)
            .collect())
    }

    pub async fn get_template(
        &self,
        actor: &Actor,
        id: RatingCardTemplateId,
    ) -> ApplicationResult<RatingCardTemplate> {
        let template = self.load_template(id).await?;
        self.policy
            .require_review_access(actor, template.company_id)
            .await?;
        Ok(template)
    }

    /// Update a template; supplied categories replace the old ones as a whole
    pub async fn update_template(
        &self,
        actor: &Actor,
        id: RatingCardTemplateId,
        cmd: UpdateRatingTemplateCommand,
    ) -> ApplicationResult<RatingCardTemplate> {
        let mut template = self.load_template(id).await?;
        self.policy
            .require_recruiting_admin(actor, template.company_id)
            .await?;

        if let Some(name) = cmd.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ApplicationError::validation("name", "Template name is required"));
            }
            template.name = name.to_string();
        }
        if cmd.description.is_some() {
            template.description = cmd.description;
        }
        if cmd.card_type.is_some() || cmd.categories.is_some() {
            let card_type = cmd.card_type.unwrap_or(template.card_type);
            let categories = cmd
                .categories
                .map(|c| c.into_iter().map(CategoryInput::into_draft).collect());
            template.set_type(card_type, categories)?;
        }
        template.updated_at = Utc::now();
        self.ratings.update_template(&template).await?;
        info!(template_id = %id, "rating template updated");
        Ok(template)
    }

    pub async fn delete_template(
        &self,
        actor: &Actor,
        id: RatingCardTemplateId,
    ) -> ApplicationResult<()> {
        let template = self.load_template(id).await?;
        self.policy
            .require_recruiting_admin(actor, template.company_id)
            .await?;
        if self.ratings.count_ratings_for_template(id).await? > 0 {
            return Err(ApplicationError::bad_request(
                "Cannot delete rating template: it has already been used to rate candidates.",
            ));
        }
        self.ratings.delete_template(id).await?;
        info!(template_id = %id, "rating template deleted");
        Ok(())
    }

    /// Record a scorecard for an application at one stage of its job's workflow
    pub async fn submit(
        &self,
        actor: &Actor,
        application_id: ApplicationId,
        cmd: SubmitRatingCommand,
    ) -> ApplicationResult<CandidateRating> {
        let application = self.load_application(application_id).await?;
        let job = self.policy.load_job(application.job_id).await?;
        if !self.policy.can_rate(actor, &job).await? {
            return Err(ApplicationError::forbidden(CANNOT_RATE));
        }

        let template = self
            .ratings
            .find_template(cmd.template_id)
            .await?
            .filter(|t| t.company_id == job.company_id)
            .ok_or_else(|| ApplicationError::not_found("Rating template not found."))?;

        let stage_in_workflow = self
            .workflows
            .find_job_workflow(job.id)
            .await?
            .is_some_and(|w| w.contains_stage(cmd.job_workflow_stage_id));
        if !stage_in_workflow {
            return Err(ApplicationError::bad_request(
                "Stage does not belong to this job's workflow.",
            ));
        }

        let overall_score = Score::new(cmd.overall_score)
            .map_err(|_| DomainError::validation("overallScore", "Score must be between 1 and 5"))?;
        let category_scores =
            template.accept_category_scores(category_scores(cmd.category_scores)?)?;

        let rating = CandidateRating {
            id: CandidateRatingId::new(),
            application_id,
            template_id: template.id,
            job_workflow_stage_id: cmd.job_workflow_stage_id,
            rater_id: actor.user_id,
            overall_score,
            comments: cmd.comments.filter(|c| !c.trim().is_empty()),
            category_scores,
            submitted_at: Utc::now(),
        };
        self.ratings.insert_rating(&rating).await?;
        info!(rating_id = %rating.id, application_id = %application_id, "rating submitted");

        let team = self.jobs.list_hiring_team(job.id).await?;
        self.notifications
            .notify(
                team.iter().map(|m| m.user_id).filter(|id| *id != actor.user_id),
                NotificationType::RatingSubmitted,
                &format!("A new rating was submitted for a candidate on {}", job.title),
                Some(format!("/applications/{application_id}")),
            )
            .await;
        Ok(rating)
    }

    pub async fn list_for_application(
        &self,
        actor: &Actor,
        application_id: ApplicationId,
    ) -> ApplicationResult<Vec<CandidateRating>> {
        let application = self.load_application(application_id).await?;
        let job = self.policy.load_job(application.job_id).await?;
        let on_team = self.policy.is_on_hiring_team(actor, job.id).await?;
        if !on_team {
            self.policy.require_review_access(actor, job.company_id).await?;
        }
        Ok(self.ratings.list_ratings(application_id).await?)
    }

    async fn load_template(
        &self,
        id: RatingCardTemplateId,
    ) -> ApplicationResult<RatingCardTemplate> {
        self.ratings
            .find_template(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Rating template not found."))
    }

    async fn load_application(&self, id: ApplicationId) -> ApplicationResult<Application> {
        self.applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Application not found."))
    }
}

fn category_scores(
    inputs: Vec<CategoryScoreInput>,
) -> Result<Vec<CategoryScore>, DomainError> {
    let mut violations = Vec::new();
    let mut scores = Vec::with_capacity(inputs.len());
    for (i, input) in inputs.into_iter().enumerate() {
        match Score::new(input.score) {
            Ok(score) => scores.push(CategoryScore {
                category_id: input.category_id,
                score,
                comment: input.comment,
            }),
            Err(_) => violations.push(FieldViolation::new(
                format!("categoryScores.{i}.score"),
                "Score must be between 1 and 5",
            )),
        }
    }
    DomainError::from_violations(violations)?;
    Ok(scores)
}
