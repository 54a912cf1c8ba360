//! Application layer error types
//!
//! These errors represent application-level failures that are suitable
//! for API consumption. Each variant maps to one HTTP status class.

use megahr_domain::errors::{DomainError, FieldViolation};
use thiserror::Error;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application layer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    /// Input failed validation; carries one entry per rejected field
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldViolation>,
    },

    /// Request is well-formed but cannot be honoured
    #[error("{0}")]
    BadRequest(String),

    /// Caller is not authenticated
    #[error("{0}")]
    Unauthorized(String),

    /// Caller is authenticated but lacks permission
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Uniqueness conflict
    #[error("{0}")]
    Conflict(String),

    /// Server-side setup is missing or wrong
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Storage or external collaborator failed
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: "Validation failed".to_string(),
            errors: vec![FieldViolation::new(path, message)],
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure(message.into())
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError { field, reason } => Self::validation(field, reason),
            DomainError::InvalidFields { violations } => Self::Validation {
                message: "Validation failed".to_string(),
                errors: violations,
            },
            DomainError::BusinessRuleViolation { rule } => Self::BadRequest(rule),
            DomainError::EntityNotFound { entity_type, .. } => {
                Self::NotFound(format!("{entity_type} not found."))
            }
            err @ DomainError::UniqueViolation { .. } => Self::Conflict(err.to_string()),
            DomainError::Storage { reason } => Self::Infrastructure(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let err: ApplicationError = DomainError::unique("User", "email").into();
        assert_eq!(
            err,
            ApplicationError::Conflict("Unique constraint failed on the fields: email".into())
        );
    }

    #[test]
    fn test_field_error_keeps_its_path() {
        let err: ApplicationError = DomainError::validation("stages", "empty").into();
        let ApplicationError::Validation { errors, .. } = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].path, "stages");
    }

    #[test]
    fn test_missing_entity_becomes_not_found() {
        let err: ApplicationError = DomainError::not_found("JobWorkflowStage", "x").into();
        assert_eq!(err.to_string(), "JobWorkflowStage not found.");
    }
}
