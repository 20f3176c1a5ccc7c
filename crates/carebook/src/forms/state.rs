use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::schemas::{FormKind, FormSchema};
use super::{FieldError, FormError, FormErrors, FormValues};

/// When a field is checked before the form is submitted. After the first submit attempt
/// every change re-validates, whatever the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    #[default]
    OnSubmit,
    OnBlur,
    OnChange,
    All,
}

impl ValidationMode {
    fn on_change(self) -> bool {
        matches!(self, ValidationMode::OnChange | ValidationMode::All)
    }

    fn on_blur(self) -> bool {
        matches!(self, ValidationMode::OnBlur | ValidationMode::All)
    }
}

/// Controlled value and latest validation outcome of one input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormFieldState {
    pub value: String,
    pub error: Option<FieldError>,
    pub touched: bool,
    pub dirty: bool,
    pub validated: bool,
}

/// Owns every field of one open screen.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    mode: ValidationMode,
    fields: BTreeMap<String, FormFieldState>,
    submit_count: u32,
}

impl FormState {
    pub fn new(schema: FormSchema, mode: ValidationMode) -> Self {
        let fields = schema
            .fields()
            .map(|(name, _)| (name.to_string(), FormFieldState::default()))
            .collect();

        Self {
            schema,
            mode,
            fields,
            submit_count: 0,
        }
    }

    pub fn for_kind(kind: FormKind, mode: ValidationMode) -> Self {
        Self::new(kind.schema(), mode)
    }

    pub fn kind(&self) -> FormKind {
        self.schema.kind()
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn field(&self, name: &str) -> Option<&FormFieldState> {
        self.fields.get(name)
    }

    /// Field change. Validates per mode and re-checks fields that compare against this one.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let revalidate = self.mode.on_change() || self.submit_count > 0;
        let state = self.field_mut(name)?;
        let value = value.into();
        state.dirty = !value.is_empty();
        state.value = value;

        if revalidate {
            self.run_rule(name);
        }
        self.revalidate_dependants(name);
        Ok(())
    }

    pub fn blur(&mut self, name: &str) -> Result<(), FormError> {
        let state = self.field_mut(name)?;
        state.touched = true;

        if self.mode.on_blur() {
            self.run_rule(name);
        }
        Ok(())
    }

    pub fn validate_field(&mut self, name: &str) -> Result<Option<FieldError>, FormError> {
        self.field_mut(name)?;
        Ok(self.run_rule(name))
    }

    /// Validate every field, recording errors on the field states.
    pub fn submit(&mut self) -> Result<FormValues, FormErrors> {
        self.submit_count += 1;
        let names: Vec<String> = self.fields.keys().cloned().collect();
        for name in &names {
            self.run_rule(name);
        }

        let errors = self.errors();
        if errors.is_empty() {
            Ok(self.values())
        } else {
            debug!(form = %self.kind(), failing = errors.len(), "form submit rejected");
            Err(errors)
        }
    }

    /// Current errors in schema order.
    pub fn errors(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        for (name, _) in self.schema.fields() {
            if let Some(error) = self.fields.get(name).and_then(|state| state.error.as_ref()) {
                errors.push(name, error);
            }
        }
        errors
    }

    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|(name, state)| (name.clone(), state.value.clone()))
            .collect()
    }

    pub fn reset(&mut self) {
        for state in self.fields.values_mut() {
            *state = FormFieldState::default();
        }
        self.submit_count = 0;
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut FormFieldState, FormError> {
        let form = self.schema.kind().slug();
        self.fields
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField {
                form,
                field: name.to_string(),
            })
    }

    fn run_rule(&mut self, name: &str) -> Option<FieldError> {
        let values = self.values();
        let rule = self.schema.rule(name)?;
        let value = values.get(name).map(String::as_str).unwrap_or_default();
        let outcome = rule.evaluate(value, &values).err();

        let state = self.fields.get_mut(name)?;
        state.error = outcome.clone();
        state.validated = true;
        outcome
    }

    fn revalidate_dependants(&mut self, changed: &str) {
        let dependants: Vec<String> = self
            .schema
            .fields()
            .filter(|(_, rule)| rule.dependencies().any(|dep| dep == changed))
            .map(|(name, _)| name.to_string())
            .filter(|name| {
                self.fields
                    .get(name)
                    .map(|state| state.validated)
                    .unwrap_or(false)
            })
            .collect();

        for name in dependants {
            self.run_rule(&name);
        }
    }
}
