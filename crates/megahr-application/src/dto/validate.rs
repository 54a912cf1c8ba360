//! Field-level validation of incoming commands

use std::sync::OnceLock;

use megahr_domain::errors::FieldViolation;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{ApplicationError, ApplicationResult};

/// Implemented by every command accepted from the outside world
pub trait Validate {
    fn violations(&self) -> Vec<FieldViolation>;

    fn validate(&self) -> ApplicationResult<()> {
        let errors = self.violations();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::Validation {
                message: "Validation failed".to_string(),
                errors,
            })
        }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex"))
}

/// Collects violations for one command
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(
        &mut self,
        ok: bool,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        if !ok {
            self.0.push(FieldViolation::new(path, message));
        }
        self
    }

    pub fn required(&mut self, path: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), path, format!("{path} is required"))
    }

    pub fn length(&mut self, path: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let len = value.trim().chars().count();
        if len < min {
            return self.check(
                false,
                path,
                if min <= 1 {
                    format!("{path} is required")
                } else {
                    format!("{path} must be at least {min} characters")
                },
            );
        }
        self.check(len <= max, path, format!("{path} must be at most {max} characters"))
    }

    pub fn email(&mut self, path: &str, value: &str) -> &mut Self {
        self.check(
            email_pattern().is_match(value.trim()),
            path,
            "Invalid email address",
        )
    }

    pub fn range(&mut self, path: &str, value: i64, min: i64, max: i64) -> &mut Self {
        self.check(
            (min..=max).contains(&value),
            path,
            format!("{path} must be between {min} and {max}"),
        )
    }

    /// Parse a string into a SCREAMING_SNAKE_CASE enum, recording a violation on failure
    pub fn parse_enum<T: DeserializeOwned>(&mut self, path: &str, value: &str) -> Option<T> {
        match serde_json::from_value(Value::String(value.trim().to_string())) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.check(false, path, format!("Invalid {path}: {value}"));
                None
            }
        }
    }

    pub fn extend(&mut self, violations: Vec<FieldViolation>) -> &mut Self {
        self.0.extend(violations);
        self
    }

    pub fn into_vec(&mut self) -> Vec<FieldViolation> {
        std::mem::take(&mut self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_failure() {
        let errors = Violations::new()
            .required("name", " ")
            .email("email", "nope")
            .range("score", 6, 1, 5)
            .into_vec();
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["name", "email", "score"]);
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(Violations::new().email("email", "ada@example.com").into_vec().is_empty());
    }
}
