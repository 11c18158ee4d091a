//! Declarative per-field validation of incoming records.
//!
//! Rules are declared with `validator` derive attributes on the record
//! types in [`crate::catalog`]; this module converts the raw
//! [`ValidationErrors`] into an ordered list of [`FieldViolation`]s.
//!
//! Every failing field is reported. Within a single field only the most
//! basic failing rule is kept: `required` before `length` before any
//! character-set rule.

use std::borrow::Cow;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, rule: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            rule: rule.to_string(),
            message: message.to_string(),
        }
    }
}

/// Aggregated result of evaluating all rules against one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from violations, sorted by field name.
    pub fn from_violations(mut errors: Vec<FieldViolation>) -> Self {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    #[cfg(test)]
    pub(crate) fn failed_fields(&self) -> Vec<&str> {
        self.errors.iter().map(|v| v.field.as_str()).collect()
    }

    /// Convert into `Ok(())` or a [`CoreError::Validation`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }
}

impl From<Result<(), ValidationErrors>> for ValidationResult {
    fn from(outcome: Result<(), ValidationErrors>) -> Self {
        match outcome {
            Ok(()) => Self::valid(),
            Err(errors) => Self::from(errors),
        }
    }
}

impl From<ValidationErrors> for ValidationResult {
    fn from(errors: ValidationErrors) -> Self {
        let violations = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.iter().min_by_key(|err| rule_rank(&err.code)).map(|err| FieldViolation {
                    field: field.to_string(),
                    rule: err.code.to_string(),
                    message: describe(&field, err),
                })
            })
            .collect();
        Self::from_violations(violations)
    }
}

/// Rule messages are predicates ("is required", "must be ..."); the field
/// name becomes their subject.
fn describe(field: &str, err: &ValidationError) -> String {
    match &err.message {
        Some(predicate) => format!("{field} {predicate}"),
        None => format!("{field} is invalid"),
    }
}

fn rule_rank(code: &str) -> u8 {
    match code {
        "required" => 0,
        "length" => 1,
        _ => 2,
    }
}

/// A record kind that knows its own field rules.
pub trait Validatable {
    fn validate(&self) -> ValidationResult;
}

// ---------------------------------------------------------------------------
// Custom rules referenced from derive attributes
// ---------------------------------------------------------------------------

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub(crate) fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(violation("required", "is required"))
    } else {
        Ok(())
    }
}

pub(crate) fn required_printable_ascii(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    printable_ascii(value)
}

pub(crate) fn required_alphanumeric(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    alphanumeric(value)
}

/// Space through tilde, the printable ASCII range.
fn printable_ascii(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| (' '..='~').contains(&c)) {
        Ok(())
    } else {
        Err(violation(
            "printable_ascii",
            "must contain printable ASCII characters only",
        ))
    }
}

fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(violation("alphanumeric", "must contain letters and digits only"))
    }
}
