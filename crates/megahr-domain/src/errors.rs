//! Domain errors for MegaHR

use serde::Serialize;
use thiserror::Error;

/// A single rejected input field, addressed by a dotted path such as `stages.0.settings.timeLimit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub path: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Validation failed")]
    InvalidFields { violations: Vec<FieldViolation> },

    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation { rule: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound { entity_type: String, id: String },

    #[error("Unique constraint failed on the fields: {field}")]
    UniqueViolation { entity_type: String, field: String },

    #[error("Storage failure: {reason}")]
    Storage { reason: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn rule(rule: impl Into<String>) -> Self {
        Self::BusinessRuleViolation { rule: rule.into() }
    }

    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::EntityNotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn unique(entity_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UniqueViolation {
            entity_type: entity_type.into(),
            field: field.into(),
        }
    }

    /// Collapse a list of violations into an error, or `Ok` when the list is empty
    pub fn from_violations(violations: Vec<FieldViolation>) -> DomainResult<()> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self::InvalidFields { violations })
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_names_the_field() {
        let err = DomainError::unique("User", "email");
        assert_eq!(
            err.to_string(),
            "Unique constraint failed on the fields: email"
        );
    }

    #[test]
    fn empty_violation_list_is_ok() {
        assert!(DomainError::from_violations(Vec::new()).is_ok());
        let err = DomainError::from_violations(vec![FieldViolation::new("name", "Required")])
            .unwrap_err();
        assert!(
            matches!(err, DomainError::InvalidFields { ref violations } if violations.len() == 1)
        );
    }
}
