use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::flows::domain::{
    AccountRole, PasswordResetRequest, RegistrationRequest, SignInRequest, VerificationRequest,
};
use crate::flows::gateway::{AccountGateway, ActionError, SimulatedAccountGateway};
use crate::flows::{account_router, AccountFlowService};
use crate::forms::FormValues;

pub(super) fn values(pairs: &[(&str, &str)]) -> FormValues {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

pub(super) fn sign_up_values() -> FormValues {
    values(&[
        ("full_name", "Grace Mensah"),
        ("email", "grace@example.com"),
        ("phone", "515-555-0199"),
        ("role", "nanny"),
        ("password", "Lullaby2024"),
        ("confirm_password", "Lullaby2024"),
    ])
}

pub(super) fn sign_in_values() -> FormValues {
    values(&[("email", "grace@example.com"), ("password", "Lullaby2024")])
}

pub(super) fn simulated_service(role: AccountRole) -> AccountFlowService<SimulatedAccountGateway> {
    AccountFlowService::new(Arc::new(
        SimulatedAccountGateway::new(Duration::ZERO).with_role(role),
    ))
}

/// Records every call that reaches the backend seam.
#[derive(Default)]
pub(super) struct RecordingGateway {
    calls: Mutex<Vec<String>>,
    registrations: Mutex<Vec<RegistrationRequest>>,
}

impl RecordingGateway {
    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(super) fn registrations(&self) -> Vec<RegistrationRequest> {
        self.registrations
            .lock()
            .expect("registrations mutex poisoned")
            .clone()
    }

    fn record(&self, call: &str) {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(call.to_string());
    }
}

#[async_trait]
impl AccountGateway for RecordingGateway {
    async fn sign_in(&self, request: SignInRequest) -> Result<AccountRole, ActionError> {
        self.record(&format!("sign_in:{}", request.email));
        Ok(AccountRole::Client)
    }

    async fn register(&self, request: RegistrationRequest) -> Result<(), ActionError> {
        self.record(&format!("register:{}", request.email));
        self.registrations
            .lock()
            .expect("registrations mutex poisoned")
            .push(request);
        Ok(())
    }

    async fn verify_email(&self, request: VerificationRequest) -> Result<(), ActionError> {
        self.record(&format!("verify_email:{}:{}", request.email, request.code));
        Ok(())
    }

    async fn request_password_reset(&self, email: String) -> Result<(), ActionError> {
        self.record(&format!("request_password_reset:{email}"));
        Ok(())
    }

    async fn reset_password(&self, request: PasswordResetRequest) -> Result<(), ActionError> {
        self.record(&format!("reset_password:{}", request.email));
        Ok(())
    }
}

/// Fails every call with the configured error.
pub(super) struct FailingGateway(pub(super) ActionError);

#[async_trait]
impl AccountGateway for FailingGateway {
    async fn sign_in(&self, _request: SignInRequest) -> Result<AccountRole, ActionError> {
        Err(self.0.clone())
    }

    async fn register(&self, _request: RegistrationRequest) -> Result<(), ActionError> {
        Err(self.0.clone())
    }

    async fn verify_email(&self, _request: VerificationRequest) -> Result<(), ActionError> {
        Err(self.0.clone())
    }

    async fn request_password_reset(&self, _email: String) -> Result<(), ActionError> {
        Err(self.0.clone())
    }

    async fn reset_password(&self, _request: PasswordResetRequest) -> Result<(), ActionError> {
        Err(self.0.clone())
    }
}

pub(super) fn router_with<G>(gateway: G) -> axum::Router
where
    G: AccountGateway + 'static,
{
    account_router(Arc::new(AccountFlowService::new(Arc::new(gateway))))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
