use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::predicates::{code_regex, validate_phone};
use super::rules::{email_validation, password_validation, Check, RuleDescriptor, ValidationRule};
use super::{FieldError, FormErrors, FormValues};

/// Screens that collect validated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    SignIn,
    SignUp,
    VerifyEmail,
    ForgotPassword,
    ResetPassword,
}

impl FormKind {
    pub const ALL: [FormKind; 5] = [
        FormKind::SignIn,
        FormKind::SignUp,
        FormKind::VerifyEmail,
        FormKind::ForgotPassword,
        FormKind::ResetPassword,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            FormKind::SignIn => "sign-in",
            FormKind::SignUp => "sign-up",
            FormKind::VerifyEmail => "verify-email",
            FormKind::ForgotPassword => "forgot-password",
            FormKind::ResetPassword => "reset-password",
        }
    }

    pub fn schema(self) -> FormSchema {
        let fields = match self {
            FormKind::SignIn => vec![
                ("email", email_validation()),
                (
                    "password",
                    ValidationRule::new().required("Password is required"),
                ),
            ],
            FormKind::SignUp => vec![
                (
                    "full_name",
                    ValidationRule::new()
                        .required("Full name is required")
                        .min_length(2, "Full name must be at least 2 characters"),
                ),
                ("email", email_validation()),
                (
                    "phone",
                    ValidationRule::new()
                        .required("Phone number is required")
                        .check(Check::from_predicate("phone", validate_phone)),
                ),
                ("role", role_rule()),
                ("password", password_validation()),
                ("confirm_password", confirm_password_rule()),
            ],
            FormKind::VerifyEmail => vec![("email", email_validation()), ("code", code_rule())],
            FormKind::ForgotPassword => vec![("email", email_validation())],
            FormKind::ResetPassword => vec![
                ("email", email_validation()),
                ("code", code_rule()),
                ("password", password_validation()),
                ("confirm_password", confirm_password_rule()),
            ],
        };

        FormSchema {
            kind: self,
            fields: fields
                .into_iter()
                .map(|(name, rule)| (name.to_string(), rule))
                .collect(),
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown form '{0}'")]
pub struct UnknownForm(pub String);

impl FromStr for FormKind {
    type Err = UnknownForm;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FormKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == value)
            .ok_or_else(|| UnknownForm(value.to_string()))
    }
}

fn code_rule() -> ValidationRule {
    ValidationRule::new()
        .required("Verification code is required")
        .pattern(code_regex().clone(), "Enter the 6-digit code")
}

fn role_rule() -> ValidationRule {
    ValidationRule::new()
        .required("Choose whether you are a parent or a nanny")
        .check(Check::from_predicate("knownRole", |value| {
            match value {
                "client" | "nanny" => Ok(()),
                _ => Err(FieldError::new("Choose whether you are a parent or a nanny")),
            }
        }))
}

fn confirm_password_rule() -> ValidationRule {
    ValidationRule::new()
        .required("Please confirm your password")
        .check(Check::matches_field(
            "matchesPassword",
            "password",
            "Passwords do not match",
        ))
}

/// Ordered field rules for one screen.
#[derive(Debug, Clone)]
pub struct FormSchema {
    kind: FormKind,
    fields: Vec<(String, ValidationRule)>,
}

impl FormSchema {
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn rule(&self, field: &str) -> Option<&ValidationRule> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    /// Check every field in order. Missing values count as empty. On success the result
    /// holds exactly the schema's fields.
    pub fn validate(&self, values: &FormValues) -> Result<FormValues, FormErrors> {
        let mut errors = FormErrors::default();
        let mut accepted = FormValues::new();

        for (name, rule) in &self.fields {
            let value = values.get(name).map(String::as_str).unwrap_or_default();
            match rule.evaluate(value, values) {
                Ok(()) => {
                    accepted.insert(name.clone(), value.to_string());
                }
                Err(error) => errors.push(name, &error),
            }
        }

        if errors.is_empty() {
            Ok(accepted)
        } else {
            Err(errors)
        }
    }

    pub fn describe(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .map(|(name, rule)| FieldDescriptor {
                name: name.clone(),
                rules: rule.describe(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub rules: RuleDescriptor,
}
