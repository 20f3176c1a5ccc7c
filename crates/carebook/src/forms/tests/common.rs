use crate::forms::FormValues;

pub(super) fn values(pairs: &[(&str, &str)]) -> FormValues {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

pub(super) fn sign_up_values() -> FormValues {
    values(&[
        ("full_name", "Amara Okafor"),
        ("email", "amara@example.com"),
        ("phone", "+1 (515) 555-0142"),
        ("role", "client"),
        ("password", "Sunflower9"),
        ("confirm_password", "Sunflower9"),
    ])
}

pub(super) fn message(result: crate::forms::FieldResult) -> String {
    match result {
        Ok(()) => panic!("expected a validation failure"),
        Err(error) => error.message().to_string(),
    }
}
