use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;

use super::predicates::{
    char_len, email_regex, has_digit, has_lowercase, has_uppercase, DEFAULT_PASSWORD_MIN_LENGTH,
};
use super::{FieldError, FieldResult, FormValues};

type CheckFn = dyn Fn(&str, &FormValues) -> FieldResult + Send + Sync;

/// Named custom check. Receives the field value and the current values of the whole form.
#[derive(Clone)]
pub struct Check {
    name: String,
    depends_on: Option<String>,
    run: Arc<CheckFn>,
}

impl Check {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&str, &FormValues) -> FieldResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            depends_on: None,
            run: Arc::new(run),
        }
    }

    /// Wrap a single-value predicate such as [`validate_phone`](super::validate_phone).
    pub fn from_predicate<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> FieldResult + Send + Sync + 'static,
    {
        Self::new(name, move |value, _| predicate(value))
    }

    /// Passes when the value equals `field`'s current value.
    pub fn matches_field(
        name: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let message = message.into();
        let target = field.clone();
        let mut check = Self::new(name, move |value, values| {
            let original = values.get(&target).map(String::as_str).unwrap_or_default();
            if original == value {
                Ok(())
            } else {
                Err(FieldError::new(message.clone()))
            }
        });
        check.depends_on = Some(field);
        check
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depends_on(&self) -> Option<&str> {
        self.depends_on.as_deref()
    }

    pub fn run(&self, value: &str, values: &FormValues) -> FieldResult {
        (self.run)(value, values)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("depends_on", &self.depends_on)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct PatternRule {
    pub value: Regex,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthRule {
    pub value: usize,
    pub message: String,
}

/// Declarative constraints attached to one form field.
///
/// Evaluation order is `required`, `min_length`, `pattern`, then each `validate` check in
/// insertion order. The first failure wins. `min_length` and `pattern` only run on a
/// non-empty value; `required` only fails on the empty string.
#[derive(Debug, Clone, Default)]
pub struct ValidationRule {
    pub required: Option<String>,
    pub pattern: Option<PatternRule>,
    pub min_length: Option<LengthRule>,
    pub validate: Vec<Check>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    pub fn pattern(mut self, value: Regex, message: impl Into<String>) -> Self {
        self.pattern = Some(PatternRule {
            value,
            message: message.into(),
        });
        self
    }

    pub fn min_length(mut self, value: usize, message: impl Into<String>) -> Self {
        self.min_length = Some(LengthRule {
            value,
            message: message.into(),
        });
        self
    }

    pub fn check(mut self, check: Check) -> Self {
        self.validate.push(check);
        self
    }

    pub fn evaluate(&self, value: &str, values: &FormValues) -> FieldResult {
        let empty = value.is_empty();

        if let Some(message) = &self.required {
            if empty {
                return Err(FieldError::new(message.clone()));
            }
        }

        if !empty {
            if let Some(rule) = &self.min_length {
                if char_len(value) < rule.value {
                    return Err(FieldError::new(rule.message.clone()));
                }
            }

            if let Some(rule) = &self.pattern {
                if !rule.value.is_match(value) {
                    return Err(FieldError::new(rule.message.clone()));
                }
            }
        }

        for check in &self.validate {
            check.run(value, values)?;
        }

        Ok(())
    }

    /// Fields whose changes can flip this rule's outcome.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.validate.iter().filter_map(Check::depends_on)
    }

    pub fn describe(&self) -> RuleDescriptor {
        RuleDescriptor {
            required: self.required.clone(),
            pattern: self.pattern.as_ref().map(|rule| PatternDescriptor {
                value: rule.value.as_str().to_string(),
                message: rule.message.clone(),
            }),
            min_length: self.min_length.clone(),
            validate: self
                .validate
                .iter()
                .map(|check| check.name().to_string())
                .collect(),
        }
    }
}

/// Serializable view of a rule, keeping the field names screens bind to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<LengthRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validate: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternDescriptor {
    pub value: String,
    pub message: String,
}

pub fn email_validation() -> ValidationRule {
    ValidationRule::new()
        .required("Email is required")
        .pattern(email_regex().clone(), "Invalid email format")
}

/// Password rules used by the account screens. No symbol requirement.
pub fn password_validation() -> ValidationRule {
    ValidationRule::new()
        .required("Password is required")
        .min_length(
            DEFAULT_PASSWORD_MIN_LENGTH,
            format!("Password must be at least {DEFAULT_PASSWORD_MIN_LENGTH} characters"),
        )
        .check(class_check(
            "hasUpper",
            has_uppercase,
            "Password must contain at least one uppercase letter",
        ))
        .check(class_check(
            "hasLower",
            has_lowercase,
            "Password must contain at least one lowercase letter",
        ))
        .check(class_check(
            "hasNumber",
            has_digit,
            "Password must contain at least one number",
        ))
}

fn class_check(name: &'static str, present: fn(&str) -> bool, message: &'static str) -> Check {
    Check::from_predicate(name, move |value| {
        if present(value) {
            Ok(())
        } else {
            Err(FieldError::new(message))
        }
    })
}
