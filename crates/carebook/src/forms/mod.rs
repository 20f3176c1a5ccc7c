//! Field validation for the account screens.
//!
//! Predicates are plain functions; rules bundle them per field; schemas bundle rules per
//! screen; [`FormState`] owns the controlled field values while a screen is open.

pub mod predicates;
pub mod rules;
pub mod schemas;
pub mod state;

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use predicates::{
    validate_confirm_password, validate_email, validate_min_length, validate_phone,
    validate_required, validate_strong_password, validate_verification_code,
    DEFAULT_PASSWORD_MIN_LENGTH,
};
pub use rules::{email_validation, password_validation, Check, RuleDescriptor, ValidationRule};
pub use schemas::{FieldDescriptor, FormKind, FormSchema, UnknownForm};
pub use state::{FormFieldState, FormState, ValidationMode};

/// Raw field values keyed by field name.
pub type FormValues = BTreeMap<String, String>;

pub type FieldResult = Result<(), FieldError>;

/// Human-readable message shown under a failing input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("{0}")]
pub struct FieldError(Cow<'static, str>);

impl FieldError {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// A failing field and its first error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Failing fields in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(Vec<FieldIssue>);

impl FormErrors {
    pub(crate) fn push(&mut self, field: &str, error: &FieldError) {
        self.0.push(FieldIssue {
            field: field.to_string(),
            message: error.message().to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&FieldIssue> {
        self.0.first()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| issue.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldIssue> {
        self.0.iter()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Misuse of a form, as opposed to a failing field.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("form '{form}' has no field named '{field}'")]
    UnknownField { form: &'static str, field: String },
}
