//! Persistence Layer Error Types
//!
//! Error mapping to domain types

use std::fmt::Display;

use megahr_domain::errors::DomainError;
use thiserror::Error;

/// Errors that can occur during persistence operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PersistenceError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A uniqueness rule would be broken
    #[error("Unique constraint failed on the fields: {field}")]
    UniqueViolation {
        entity_type: &'static str,
        field: &'static str,
    },
}

impl PersistenceError {
    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Display) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a unique violation error
    pub fn unique(entity_type: &'static str, field: &'static str) -> Self {
        Self::UniqueViolation { entity_type, field }
    }
}

/// Convert persistence errors to domain errors
impl From<PersistenceError> for DomainError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { entity_type, id } => DomainError::EntityNotFound {
                entity_type: entity_type.to_string(),
                id,
            },
            PersistenceError::UniqueViolation { entity_type, field } => {
                DomainError::UniqueViolation {
                    entity_type: entity_type.to_string(),
                    field: field.to_string(),
                }
            }
        }
    }
}
