use chrono::{DateTime, Utc};
use megahr_domain::{
    entities::{CategoryDraft, RatingCardTemplate, RatingCardType},
    errors::FieldViolation,
    value_objects::{JobWorkflowStageId, RatingCardTemplateId, RatingCategoryId},
};
use serde::{Deserialize, Serialize};

use super::validate::{Validate, Violations};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub order: i64,
}

impl CategoryInput {
    pub fn into_draft(self) -> CategoryDraft {
        CategoryDraft {
            name: self.name,
            description: self.description,
            order: self.order.max(0) as u32,
        }
    }
}

fn category_violations(v: &mut Violations, categories: &[CategoryInput]) {
    for (i, category) in categories.iter().enumerate() {
        v.length(&format!("categories.{i}.name"), &category.name, 1, 100)
            .check(
                category.order >= 0,
                format!("categories.{i}.order"),
                "Order must be a non-negative integer",
            );
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingTemplateCommand {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub card_type: RatingCardType,
    #[serde(default)]
    pub categories: Vec<CategoryInput>,
}

impl Validate for CreateRatingTemplateCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.length("name", &self.name, 1, 100).check(
            self.card_type == RatingCardType::Basic || !self.categories.is_empty(),
            "categories",
            "Categorized templates must have at least one category",
        );
        category_violations(&mut v, &self.categories);
        v.into_vec()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatingTemplateCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<RatingCardType>,
    pub categories: Option<Vec<CategoryInput>>,
}

impl Validate for UpdateRatingTemplateCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.length("name", name, 1, 100);
        }
        if let Some(categories) = &self.categories {
            category_violations(&mut v, categories);
        }
        v.into_vec()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingTemplateSummary {
    pub id: RatingCardTemplateId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub card_type: RatingCardType,
    pub category_count: usize,
    pub updated_at: DateTime<Utc>,
}

impl From<&RatingCardTemplate> for RatingTemplateSummary {
    fn from(template: &RatingCardTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name.clone(),
            description: template.description.clone(),
            card_type: template.card_type,
            category_count: template.categories.len(),
            updated_at: template.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScoreInput {
    pub category_id: RatingCategoryId,
    pub score: i64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingCommand {
    pub template_id: RatingCardTemplateId,
    pub job_workflow_stage_id: JobWorkflowStageId,
    pub overall_score: i64,
    pub comments: Option<String>,
    #[serde(default)]
    pub category_scores: Vec<CategoryScoreInput>,
}

impl Validate for SubmitRatingCommand {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.range("overallScore", self.overall_score, 1, 5);
        for (i, score) in self.category_scores.iter().enumerate() {
            v.range(&format!("categoryScores.{i}.score"), score.score, 1, 5);
        }
        v.into_vec()
    }
}
