//! Stateless field predicates shared by the screen rule bundles.

use std::sync::OnceLock;

use regex::Regex;

use super::{FieldError, FieldResult};

pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

pub(crate) const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^\+?[0-9]{10,15}$";
const CODE_PATTERN: &str = r"^[0-9]{6}$";

pub(crate) fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"))
}

pub(crate) fn code_regex() -> &'static Regex {
    static CODE: OnceLock<Regex> = OnceLock::new();
    CODE.get_or_init(|| Regex::new(CODE_PATTERN).expect("code pattern compiles"))
}

/// Character classes checked by the password rules. ASCII only.
pub(crate) fn has_uppercase(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_uppercase())
}

pub(crate) fn has_lowercase(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_lowercase())
}

pub(crate) fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

/// `[\W_]`: anything that is not an ASCII letter or digit, underscore included.
pub(crate) fn has_symbol(value: &str) -> bool {
    value.chars().any(|c| !c.is_ascii_alphanumeric())
}

pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Matches `local@domain.tld` without trimming or case folding.
pub fn validate_email(value: &str) -> FieldResult {
    if email_regex().is_match(value) {
        Ok(())
    } else {
        Err(FieldError::new("Invalid email format"))
    }
}

pub fn validate_min_length(min: usize) -> impl Fn(&str) -> FieldResult + Clone + Send + Sync {
    move |value: &str| {
        if char_len(value) >= min {
            Ok(())
        } else {
            Err(FieldError::new(format!(
                "Must be at least {min} characters long"
            )))
        }
    }
}

/// Length first, then every character class. Requires a symbol, unlike
/// [`password_validation`](super::rules::password_validation).
pub fn validate_strong_password(
    min: usize,
) -> impl Fn(&str) -> FieldResult + Clone + Send + Sync {
    move |value: &str| {
        if char_len(value) < min {
            return Err(FieldError::new(format!(
                "Password must be at least {min} characters"
            )));
        }

        if has_uppercase(value) && has_lowercase(value) && has_digit(value) && has_symbol(value) {
            Ok(())
        } else {
            Err(FieldError::new(
                "Password must contain uppercase, lowercase, number, and symbol",
            ))
        }
    }
}

/// Compares against the original passed in at validation time, so the target is never stale.
pub fn validate_confirm_password(original: &str, candidate: &str) -> FieldResult {
    if original == candidate {
        Ok(())
    } else {
        Err(FieldError::new("Passwords do not match"))
    }
}

pub fn validate_required(value: &str) -> FieldResult {
    if value.trim().is_empty() {
        Err(FieldError::new("This field is required"))
    } else {
        Ok(())
    }
}

/// Accepts 10 to 15 digits with an optional leading `+`; spaces, dots, dashes and
/// parentheses are ignored.
pub fn validate_phone(value: &str) -> FieldResult {
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    if phone_regex().is_match(&compact) {
        Ok(())
    } else {
        Err(FieldError::new("Invalid phone number"))
    }
}

pub fn validate_verification_code(value: &str) -> FieldResult {
    if code_regex().is_match(value) {
        Ok(())
    } else {
        Err(FieldError::new("Enter the 6-digit code"))
    }
}
