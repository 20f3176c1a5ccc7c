use super::common::*;
use crate::forms::{
    email_validation, password_validation, Check, FieldError, FormKind, FormValues,
    ValidationRule,
};

#[test]
fn email_bundle_resolves_first_failure() {
    let rule = email_validation();
    let empty = FormValues::new();

    assert_eq!(message(rule.evaluate("", &empty)), "Email is required");
    assert_eq!(message(rule.evaluate("nanny@", &empty)), "Invalid email format");
    assert!(rule.evaluate("nanny@carebook.app", &empty).is_ok());
}

#[test]
fn password_bundle_does_not_require_symbol() {
    let rule = password_validation();
    let empty = FormValues::new();

    assert!(rule.evaluate("Sunflower9", &empty).is_ok());
    assert_eq!(message(rule.evaluate("", &empty)), "Password is required");
    assert_eq!(
        message(rule.evaluate("Sun9", &empty)),
        "Password must be at least 8 characters"
    );
    assert_eq!(
        message(rule.evaluate("sunflower9", &empty)),
        "Password must contain at least one uppercase letter"
    );
    assert_eq!(
        message(rule.evaluate("SUNFLOWER9", &empty)),
        "Password must contain at least one lowercase letter"
    );
    assert_eq!(
        message(rule.evaluate("Sunflowers", &empty)),
        "Password must contain at least one number"
    );
}

#[test]
fn optional_rule_skips_length_and_pattern_when_empty() {
    let rule = ValidationRule::new()
        .min_length(3, "too short")
        .pattern(regex::Regex::new("^[a-z]+$").expect("regex"), "lowercase only");
    let empty = FormValues::new();

    assert!(rule.evaluate("", &empty).is_ok());
    assert_eq!(message(rule.evaluate("ab", &empty)), "too short");
    assert_eq!(message(rule.evaluate("ABC", &empty)), "lowercase only");
}

#[test]
fn required_rule_accepts_whitespace() {
    let rule = ValidationRule::new().required("needed");
    assert!(rule.evaluate(" ", &FormValues::new()).is_ok());
}

#[test]
fn custom_checks_run_in_insertion_order() {
    let rule = ValidationRule::new()
        .check(Check::from_predicate("first", |_| Err(FieldError::new("first"))))
        .check(Check::from_predicate("second", |_| Err(FieldError::new("second"))));

    assert_eq!(message(rule.evaluate("x", &FormValues::new())), "first");
}

#[test]
fn matches_field_reads_sibling_at_evaluation_time() {
    let rule = ValidationRule::new().check(Check::matches_field(
        "matchesPassword",
        "password",
        "Passwords do not match",
    ));

    let first = values(&[("password", "Sunflower9")]);
    let changed = values(&[("password", "Sunflower10")]);

    assert!(rule.evaluate("Sunflower9", &first).is_ok());
    assert_eq!(
        message(rule.evaluate("Sunflower9", &changed)),
        "Passwords do not match"
    );
    assert_eq!(rule.dependencies().collect::<Vec<_>>(), vec!["password"]);
}

#[test]
fn describe_keeps_rule_field_names() {
    let descriptor = password_validation().describe();
    let json = serde_json::to_value(&descriptor).expect("serializes");

    assert_eq!(json["required"], "Password is required");
    assert_eq!(json["minLength"]["value"], 8);
    assert_eq!(
        json["validate"],
        serde_json::json!(["hasUpper", "hasLower", "hasNumber"])
    );
    assert!(json.get("pattern").is_none());

    let email = serde_json::to_value(email_validation().describe()).expect("serializes");
    assert_eq!(email["pattern"]["message"], "Invalid email format");
}

#[test]
fn sign_up_schema_accepts_complete_values() {
    let schema = FormKind::SignUp.schema();
    let accepted = schema.validate(&sign_up_values()).expect("valid sign up");

    assert_eq!(accepted.len(), 6);
    assert_eq!(accepted["role"], "client");
}

#[test]
fn sign_up_schema_reports_failures_in_field_order() {
    let schema = FormKind::SignUp.schema();
    let mut input = sign_up_values();
    input.insert("confirm_password".to_string(), "Sunflower8".to_string());
    input.insert("email".to_string(), "amara".to_string());
    input.remove("role");

    let errors = schema.validate(&input).expect_err("invalid sign up");

    let fields: Vec<&str> = errors.iter().map(|issue| issue.field.as_str()).collect();
    assert_eq!(fields, vec!["email", "role", "confirm_password"]);
    assert_eq!(errors.first().map(|issue| issue.message.as_str()), Some("Invalid email format"));
    assert_eq!(
        errors.get("role"),
        Some("Choose whether you are a parent or a nanny")
    );
    assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
}

#[test]
fn validate_drops_values_outside_schema() {
    let schema = FormKind::ForgotPassword.schema();
    let input = values(&[("email", "a@b.co"), ("referrer", "ad")]);

    let accepted = schema.validate(&input).expect("valid");
    assert_eq!(accepted.len(), 1);
    assert!(!accepted.contains_key("referrer"));
}

#[test]
fn form_kind_round_trips_slugs() {
    for kind in FormKind::ALL {
        assert_eq!(kind.slug().parse::<FormKind>().expect("known slug"), kind);
    }
    assert!("checkout".parse::<FormKind>().is_err());
}
