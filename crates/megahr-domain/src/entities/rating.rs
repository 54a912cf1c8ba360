//! Rating rubrics and submitted candidate ratings

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult, FieldViolation};
use crate::value_objects::{
    ApplicationId, CandidateRatingId, CompanyId, JobWorkflowStageId, RatingCardTemplateId,
    RatingCategoryId, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingCardType {
    Basic,
    Categorized,
}

/// A score on the 1..=5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> DomainResult<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::validation(
                "score",
                format!("Score must be between {} and {}", Self::MIN, Self::MAX),
            ))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingCategory {
    pub id: RatingCategoryId,
    pub name: String,
    pub description: Option<String>,
    pub order: u32,
}

/// Reusable scoring rubric
///
/// Categorized rubrics carry at least one category; basic rubrics carry none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingCardTemplate {
    pub id: RatingCardTemplateId,
    pub company_id: CompanyId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub card_type: RatingCardType,
    pub categories: Vec<RatingCategory>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RatingCardTemplate {
    pub fn new(
        company_id: CompanyId,
        name: &str,
        description: Option<String>,
        card_type: RatingCardType,
        categories: Vec<CategoryDraft>,
        created_by: UserId,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name", "Template name is required"));
        }
        let now = Utc::now();
        let mut template = Self {
            id: RatingCardTemplateId::new(),
            company_id,
            name: name.to_string(),
            description,
            card_type,
            categories: Vec::new(),
            created_by,
            created_at: now,
            updated_at: now,
        };
        template.set_type(card_type, Some(categories))?;
        Ok(template)
    }

    /// Change the rubric type and/or replace its categories as one unit
    ///
    /// Switching to BASIC clears categories. Switching to CATEGORIZED without a
    /// replacement set keeps the current categories, which must then be non-empty.
    pub fn set_type(
        &mut self,
        card_type: RatingCardType,
        categories: Option<Vec<CategoryDraft>>,
    ) -> DomainResult<()> {
        let categories = match card_type {
            RatingCardType::Basic => Vec::new(),
            RatingCardType::Categorized => match categories {
                Some(drafts) => build_categories(drafts)?,
                None => self.categories.clone(),
            },
        };
        if card_type == RatingCardType::Categorized && categories.is_empty() {
            return Err(DomainError::validation(
                "categories",
                "Categorized templates must have at least one category",
            ));
        }
        self.card_type = card_type;
        self.categories = categories;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn category(&self, id: RatingCategoryId) -> Option<&RatingCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Check submitted category scores against this rubric
    ///
    /// Every supplied score must name a distinct category of this rubric, so a
    /// BASIC rubric accepts none. CATEGORIZED rubrics require at least one.
    pub fn accept_category_scores(
        &self,
        scores: Vec<CategoryScore>,
    ) -> DomainResult<Vec<CategoryScore>> {
        if self.card_type == RatingCardType::Categorized && scores.is_empty() {
            return Err(DomainError::validation(
                "categoryScores",
                "Category scores are required for categorized rating templates",
            ));
        }
        let mut seen = HashSet::new();
        let mut violations = Vec::new();
        for (i, score) in scores.iter().enumerate() {
            if self.category(score.category_id).is_none() {
                violations.push(FieldViolation::new(
                    format!("categoryScores.{i}.categoryId"),
                    format!("Category {} does not belong to this template", score.category_id),
                ));
            } else if !seen.insert(score.category_id) {
                violations.push(FieldViolation::new(
                    format!("categoryScores.{i}.categoryId"),
                    "Category scored more than once",
                ));
            }
        }
        DomainError::from_violations(violations)?;
        Ok(scores)
    }
}

fn build_categories(drafts: Vec<CategoryDraft>) -> DomainResult<Vec<RatingCategory>> {
    let mut violations = Vec::new();
    for (i, draft) in drafts.iter().enumerate() {
        if draft.name.trim().is_empty() {
            violations.push(FieldViolation::new(
                format!("categories.{i}.name"),
                "Category name is required",
            ));
        }
    }
    DomainError::from_violations(violations)?;
    let mut categories: Vec<RatingCategory> = drafts
        .into_iter()
        .map(|d| RatingCategory {
            id: RatingCategoryId::new(),
            name: d.name.trim().to_string(),
            description: d.description,
            order: d.order,
        })
        .collect();
    categories.sort_by_key(|c| c.order);
    Ok(categories)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category_id: RatingCategoryId,
    pub score: Score,
    pub comment: Option<String>,
}

/// A rater's assessment of an application at one workflow stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRating {
    pub id: CandidateRatingId,
    pub application_id: ApplicationId,
    pub template_id: RatingCardTemplateId,
    pub job_workflow_stage_id: JobWorkflowStageId,
    pub rater_id: UserId,
    pub overall_score: Score,
    pub comments: Option<String>,
    pub category_scores: Vec<CategoryScore>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorized() -> RatingCardTemplate {
        RatingCardTemplate::new(
            CompanyId::new(),
            "Engineering rubric",
            None,
            RatingCardType::Categorized,
            vec![
                CategoryDraft {
                    name: "Design".into(),
                    description: None,
                    order: 2,
                },
                CategoryDraft {
                    name: "Coding".into(),
                    description: None,
                    order: 1,
                },
            ],
            UserId::new(),
        )
        .unwrap()
    }

    #[test]
    fn score_bounds() {
        assert!(Score::new(0).is_err());
        assert!(Score::new(6).is_err());
        assert_eq!(Score::new(5).unwrap().value(), 5);
        assert!(serde_json::from_str::<Score>("7").is_err());
    }

    #[test]
    fn categorized_requires_categories() {
        let err = RatingCardTemplate::new(
            CompanyId::new(),
            "x",
            None,
            RatingCardType::Categorized,
            vec![],
            UserId::new(),
        )
        .unwrap_err();
        assert!(
            matches!(err, DomainError::ValidationError { ref field, .. } if field == "categories")
        );
    }

    #[test]
    fn categorized_rubric_rejects_missing_and_foreign_scores() {
        let template = categorized();
        assert!(template.accept_category_scores(vec![]).is_err());

        let foreign = CategoryScore {
            category_id: RatingCategoryId::new(),
            score: Score::new(3).unwrap(),
            comment: None,
        };
        assert!(template.accept_category_scores(vec![foreign]).is_err());

        let own = CategoryScore {
            category_id: template.categories[0].id,
            score: Score::new(4).unwrap(),
            comment: None,
        };
        assert_eq!(
            template
                .accept_category_scores(vec![own.clone()])
                .unwrap()
                .len(),
            1
        );

        let err = template
            .accept_category_scores(vec![own.clone(), own])
            .unwrap_err();
        let DomainError::InvalidFields { violations } = err else {
            panic!("expected field violations, got {err:?}");
        };
        assert_eq!(violations[0].path, "categoryScores.1.categoryId");
    }

    #[test]
    fn basic_rubric_rejects_any_category_score() {
        let mut template = categorized();
        template.set_type(RatingCardType::Basic, None).unwrap();
        assert!(template.accept_category_scores(vec![]).unwrap().is_empty());

        let stray = CategoryScore {
            category_id: RatingCategoryId::new(),
            score: Score::new(3).unwrap(),
            comment: None,
        };
        assert!(template.accept_category_scores(vec![stray]).is_err());
    }

    #[test]
    fn switching_to_basic_clears_categories() {
        let mut template = categorized();
        assert_eq!(template.categories[0].name, "Coding");
        template.set_type(RatingCardType::Basic, None).unwrap();
        assert!(template.categories.is_empty());
        assert!(template.set_type(RatingCardType::Categorized, None).is_err());
    }
}
