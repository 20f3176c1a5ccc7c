use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{
    AccountRole, PasswordResetRequest, RegistrationRequest, Route, SignInRequest, Transition,
    VerificationRequest,
};
use super::gateway::{AccountGateway, ActionError};
use crate::forms::{FieldError, FormErrors, FormKind, FormValues};

/// Service composing the screen schemas with the account gateway.
pub struct AccountFlowService<G> {
    gateway: Arc<G>,
}

impl<G> AccountFlowService<G>
where
    G: AccountGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Run the schema for `form` without calling the gateway.
    pub fn validate(&self, form: FormKind, values: &FormValues) -> Result<FormValues, FlowError> {
        form.schema().validate(values).map_err(|errors| {
            warn!(%form, failing = errors.len(), "form rejected");
            FlowError::Invalid { form, errors }
        })
    }

    pub async fn sign_in(&self, values: FormValues) -> Result<Transition, FlowError> {
        let form = FormKind::SignIn;
        let mut accepted = self.validate(form, &values)?;
        let request = SignInRequest {
            email: take(&mut accepted, "email"),
            password: take(&mut accepted, "password"),
        };

        let role = self
            .gateway
            .sign_in(request)
            .await
            .map_err(|source| action_failed(form, source))?;

        Ok(transition(form, Route::home_for(role), "Welcome back"))
    }

    pub async fn sign_up(&self, values: FormValues) -> Result<Transition, FlowError> {
        let form = FormKind::SignUp;
        let mut accepted = self.validate(form, &values)?;
        let role_value = take(&mut accepted, "role");
        let role = AccountRole::parse(&role_value).ok_or_else(|| {
            let mut errors = FormErrors::default();
            errors.push(
                "role",
                &FieldError::new("Choose whether you are a parent or a nanny"),
            );
            FlowError::Invalid { form, errors }
        })?;
        let email = take(&mut accepted, "email");
        let request = RegistrationRequest {
            full_name: take(&mut accepted, "full_name"),
            email: email.clone(),
            phone: take(&mut accepted, "phone"),
            role,
            password: take(&mut accepted, "password"),
        };

        self.gateway
            .register(request)
            .await
            .map_err(|source| action_failed(form, source))?;

        Ok(transition(
            form,
            Route::VerifyEmail { email },
            "Check your inbox for a verification code",
        ))
    }

    pub async fn verify_email(&self, values: FormValues) -> Result<Transition, FlowError> {
        let form = FormKind::VerifyEmail;
        let mut accepted = self.validate(form, &values)?;
        let request = VerificationRequest {
            email: take(&mut accepted, "email"),
            code: take(&mut accepted, "code"),
        };

        self.gateway
            .verify_email(request)
            .await
            .map_err(|source| action_failed(form, source))?;

        Ok(transition(form, Route::SignIn, "Email verified, please sign in"))
    }

    pub async fn forgot_password(&self, values: FormValues) -> Result<Transition, FlowError> {
        let form = FormKind::ForgotPassword;
        let mut accepted = self.validate(form, &values)?;
        let email = take(&mut accepted, "email");

        self.gateway
            .request_password_reset(email.clone())
            .await
            .map_err(|source| action_failed(form, source))?;

        Ok(transition(
            form,
            Route::ResetPassword { email },
            "We sent a reset code to your email",
        ))
    }

    pub async fn reset_password(&self, values: FormValues) -> Result<Transition, FlowError> {
        let form = FormKind::ResetPassword;
        let mut accepted = self.validate(form, &values)?;
        let request = PasswordResetRequest {
            email: take(&mut accepted, "email"),
            code: take(&mut accepted, "code"),
            password: take(&mut accepted, "password"),
        };

        self.gateway
            .reset_password(request)
            .await
            .map_err(|source| action_failed(form, source))?;

        Ok(transition(
            form,
            Route::SignIn,
            "Password updated, please sign in",
        ))
    }

    pub async fn submit(&self, form: FormKind, values: FormValues) -> Result<Transition, FlowError> {
        match form {
            FormKind::SignIn => self.sign_in(values).await,
            FormKind::SignUp => self.sign_up(values).await,
            FormKind::VerifyEmail => self.verify_email(values).await,
            FormKind::ForgotPassword => self.forgot_password(values).await,
            FormKind::ResetPassword => self.reset_password(values).await,
        }
    }
}

fn take(values: &mut FormValues, field: &str) -> String {
    values.remove(field).unwrap_or_default()
}

fn transition(form: FormKind, next: Route, message: &str) -> Transition {
    info!(%form, next = next.path(), "account flow advanced");
    Transition {
        form,
        next,
        message: message.to_string(),
    }
}

fn action_failed(form: FormKind, source: ActionError) -> FlowError {
    warn!(%form, error = %source, "account action failed");
    FlowError::Action { form, source }
}

/// Error raised by the account flows.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("{form} form is invalid: {errors}")]
    Invalid { form: FormKind, errors: FormErrors },
    #[error("{form} failed: {source}")]
    Action {
        form: FormKind,
        #[source]
        source: ActionError,
    },
}

impl FlowError {
    pub fn form(&self) -> FormKind {
        match self {
            FlowError::Invalid { form, .. } | FlowError::Action { form, .. } => *form,
        }
    }
}
