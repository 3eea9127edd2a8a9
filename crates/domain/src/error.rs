//! Unified error types for the domain layer
//!
//! The derivation engine is lenient: absent or malformed nested fields are
//! defaulted, unknown lookup keys resolve to sentinels. The only failure it
//! signals is a wholly absent payload. Storage-side checks in
//! [`crate::records`] report field violations through the same type.

use std::fmt;

use thiserror::Error;

/// A single storage constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted path to the offending field (e.g., `stats.character_name`)
    pub field: String,
    /// Human-readable description of the violated constraint
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The raw payload was null, empty, or carried no character document
    #[error("{0}")]
    MissingInput(String),

    /// A record failed validation (e.g., unknown trait name, missing section)
    #[error("{0}")]
    Validation(String),

    /// One or more fields violate storage constraints
    #[error("Invalid stat block: {}", join_violations(.0))]
    ValidationErrors(Vec<FieldViolation>),

    /// Parse error (for lookup keys and payload documents)
    #[error("Parse error: {0}")]
    Parse(String),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    /// Message used when the payload carries no character data at all.
    pub const NO_DATA: &'static str = "No data found.";

    /// Create a missing input error
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Creates a validation error for record-level rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if !Skill::is_known(name) {
    ///     return Err(DomainError::validation(format!("Invalid trait name '{name}'.")));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// The field violations carried by this error, if any.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::ValidationErrors(violations) => violations,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_error() {
        let err = DomainError::missing_input(DomainError::NO_DATA);
        assert!(matches!(err, DomainError::MissingInput(_)));
        assert_eq!(err.to_string(), "No data found.");
    }

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("Invalid trait name 'juggling'.");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid trait name 'juggling'.");
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = DomainError::ValidationErrors(vec![
            FieldViolation::new("stats.character_name", "must be at most 50 characters"),
            FieldViolation::new("skills.skill_name", "must be at most 20 characters"),
        ]);
        assert_eq!(err.violations().len(), 2);
        assert_eq!(
            err.to_string(),
            "Invalid stat block: stats.character_name: must be at most 50 characters; \
             skills.skill_name: must be at most 20 characters"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown ability: luck");
        assert!(err.violations().is_empty());
        assert_eq!(err.to_string(), "Parse error: Unknown ability: luck");
    }
}
