//! Rating templates and scorecard submission

mod common;

use megahr_application::access::Actor;
use megahr_application::dto::{
    AssignWorkflowCommand, CategoryInput, CategoryScoreInput, CreateRatingTemplateCommand,
    SubmitRatingCommand,
};
use megahr_application::errors::ApplicationError;
use megahr_domain::entities::{Application, JobWorkflow, RatingCardTemplate, RatingCardType};
use megahr_domain::roles::{CompanyMemberRole, UserRole};
use megahr_domain::value_objects::{CompanyId, JobWorkflowStageId, RatingCategoryId};

use common::{world, World};

struct Setup {
    w: World,
    owner: Actor,
    rater: Actor,
    outsider: Actor,
    company_id: CompanyId,
    workflow: JobWorkflow,
    application: Application,
}

/// A job with one hiring-team reviewer, one reviewer outside the team and one applicant
async fn setup() -> Setup {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let rater = w.user("rater@acme.test", UserRole::Standard).await;
    let outsider = w.user("outsider@acme.test", UserRole::Standard).await;
    let company = w.company(&owner).await;
    w.join(&company, &rater, CompanyMemberRole::Reviewer).await;
    w.join(&company, &outsider, CompanyMemberRole::Reviewer).await;
    let job = w.job(&owner, &company, &[&rater]).await;
    let template = w.pipeline(&owner, &company).await;
    let workflow = w
        .services
        .workflows
        .assign_to_job(&owner, job.id, AssignWorkflowCommand { template_id: template.id })
        .await
        .unwrap();
    let application = w.apply(&owner, &job, "ada@example.com").await;
    Setup {
        w,
        owner,
        rater,
        outsider,
        company_id: company.id,
        workflow,
        application,
    }
}

async fn rubric(s: &Setup, card_type: RatingCardType) -> RatingCardTemplate {
    let categories = match card_type {
        RatingCardType::Basic => vec![],
        RatingCardType::Categorized => vec![
            CategoryInput {
                name: "Communication".into(),
                description: None,
                order: 0,
            },
            CategoryInput {
                name: "Technical".into(),
                description: None,
                order: 1,
            },
        ],
    };
    s.w.services
        .ratings
        .create_template(
            &s.owner,
            s.company_id,
            CreateRatingTemplateCommand {
                name: "Panel".into(),
                description: None,
                card_type,
                categories,
            },
        )
        .await
        .unwrap()
}

impl Setup {
    fn submission(&self, template: &RatingCardTemplate, overall: i64) -> SubmitRatingCommand {
        SubmitRatingCommand {
            template_id: template.id,
            job_workflow_stage_id: self.workflow.stages[0].id,
            overall_score: overall,
            comments: Some("Solid".into()),
            category_scores: vec![],
        }
    }
}

#[tokio::test]
async fn test_team_member_submits_basic_rating() {
    let s = setup().await;
    let template = rubric(&s, RatingCardType::Basic).await;

    let rating = s
        .w
        .services
        .ratings
        .submit(&s.rater, s.application.id, s.submission(&template, 4))
        .await
        .unwrap();

    assert_eq!(rating.overall_score.value(), 4);
    assert!(rating.category_scores.is_empty());
    let listed = s
        .w
        .services
        .ratings
        .list_for_application(&s.rater, s.application.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

fn score_for(category_id: RatingCategoryId) -> CategoryScoreInput {
    CategoryScoreInput {
        category_id,
        score: 3,
        comment: None,
    }
}

async fn rejected_paths(s: &Setup, cmd: SubmitRatingCommand) -> Vec<String> {
    let err = s
        .w
        .services
        .ratings
        .submit(&s.rater, s.application.id, cmd)
        .await
        .unwrap_err();
    let ApplicationError::Validation { errors, .. } = err else {
        panic!("expected validation error, got {err:?}");
    };
    let listed = s
        .w
        .services
        .ratings
        .list_for_application(&s.rater, s.application.id)
        .await
        .unwrap();
    assert!(listed.is_empty());
    errors.into_iter().map(|e| e.path).collect()
}

#[tokio::test]
async fn test_basic_rating_rejects_category_scores() {
    let s = setup().await;
    let template = rubric(&s, RatingCardType::Basic).await;

    let mut cmd = s.submission(&template, 4);
    cmd.category_scores = vec![score_for(RatingCategoryId::new())];

    assert_eq!(
        rejected_paths(&s, cmd).await,
        vec!["categoryScores.0.categoryId"]
    );
}

#[tokio::test]
async fn test_categorized_rating_rejects_unknown_category() {
    let s = setup().await;
    let template = rubric(&s, RatingCardType::Categorized).await;

    let mut cmd = s.submission(&template, 4);
    cmd.category_scores = vec![
        score_for(template.categories[0].id),
        score_for(RatingCategoryId::new()),
    ];

    assert_eq!(
        rejected_paths(&s, cmd).await,
        vec!["categoryScores.1.categoryId"]
    );
}

#[tokio::test]
async fn test_categorized_rating_rejects_duplicate_category() {
    let s = setup().await;
    let template = rubric(&s, RatingCardType::Categorized).await;
    let communication = template.categories[0].id;

    let mut cmd = s.submission(&template, 4);
    cmd.category_scores = vec![score_for(communication), score_for(communication)];

    assert_eq!(
        rejected_paths(&s, cmd).await,
        vec!["categoryScores.1.categoryId"]
    );
}

#[tokio::test]
async fn test_overall_score_above_five_is_rejected() {
    let s = setup().await;
    let template = rubric(&s, RatingCardType::Basic).await;

    let err = s
        .w
        .services
        .ratings
        .submit(&s.rater, s.application.id, s.submission(&template, 6))
        .await
        .unwrap_err();
    let ApplicationError::Validation { errors, .. } = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors[0].path, "overallScore");
}

#[tokio::test]
async fn test_categorized_rating_requires_category_scores() {
    let s = setup().await;
    let template = rubric(&s, RatingCardType::Categorized).await;

    let err = s
        .w
        .services
        .ratings
        .submit(&s.rater, s.application.id, s.submission(&template, 3))
        .await
        .unwrap_err();
    let ApplicationError::Validation { errors, .. } = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors[0].path, "categoryScores");

    let mut cmd = s.submission(&template, 3);
    cmd.category_scores = template
        .categories
        .iter()
        .map(|c| CategoryScoreInput {
            category_id: c.id,
            score: 5,
            comment: None,
        })
        .collect();
    let rating = s
        .w
        .services
        .ratings
        .submit(&s.rater, s.application.id, cmd)
        .await
        .unwrap();
    assert_eq!(rating.category_scores.len(), 2);
}

#[tokio::test]
async fn test_stage_outside_workflow_is_rejected() {
    let s = setup().await;
    let template = rubric(&s, RatingCardType::Basic).await;

    let mut cmd = s.submission(&template, 3);
    cmd.job_workflow_stage_id = JobWorkflowStageId::new();
    let err = s
        .w
        .services
        .ratings
        .submit(&s.rater, s.application.id, cmd)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BadRequest(_)));
}

#[tokio::test]
async fn test_reviewer_outside_hiring_team_cannot_rate() {
    let s = setup().await;
    let template = rubric(&s, RatingCardType::Basic).await;

    let err = s
        .w
        .services
        .ratings
        .submit(&s.outsider, s.application.id, s.submission(&template, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn test_used_template_cannot_be_deleted() {
    let s = setup().await;
    let template = rubric(&s, RatingCardType::Basic).await;
    s.w.services
        .ratings
        .submit(&s.owner, s.application.id, s.submission(&template, 5))
        .await
        .unwrap();

    let err = s
        .w
        .services
        .ratings
        .delete_template(&s.owner, template.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BadRequest(_)));
}
