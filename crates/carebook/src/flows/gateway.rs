use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::domain::{
    AccountRole, PasswordResetRequest, RegistrationRequest, SignInRequest, VerificationRequest,
};

/// Backend operations behind the account screens.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    async fn sign_in(&self, request: SignInRequest) -> Result<AccountRole, ActionError>;
    async fn register(&self, request: RegistrationRequest) -> Result<(), ActionError>;
    async fn verify_email(&self, request: VerificationRequest) -> Result<(), ActionError>;
    async fn request_password_reset(&self, email: String) -> Result<(), ActionError>;
    async fn reset_password(&self, request: PasswordResetRequest) -> Result<(), ActionError>;
}

/// Failure reported by a gateway call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("account service unavailable: {0}")]
    Unavailable(String),
}

/// Stand-in backend: waits `latency`, then succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedAccountGateway {
    latency: Duration,
    role: AccountRole,
}

impl SimulatedAccountGateway {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            role: AccountRole::Client,
        }
    }

    /// Role reported by every sign in.
    pub fn with_role(mut self, role: AccountRole) -> Self {
        self.role = role;
        self
    }

    async fn pause(&self, action: &'static str) {
        debug!(action, latency_ms = self.latency.as_millis() as u64, "simulating account call");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for SimulatedAccountGateway {
    fn default() -> Self {
        Self::new(crate::config::ActionConfig::default().latency)
    }
}

#[async_trait]
impl AccountGateway for SimulatedAccountGateway {
    async fn sign_in(&self, request: SignInRequest) -> Result<AccountRole, ActionError> {
        self.pause("sign_in").await;
        debug!(email = %request.email, role = self.role.label(), "simulated sign in");
        Ok(self.role)
    }

    async fn register(&self, request: RegistrationRequest) -> Result<(), ActionError> {
        self.pause("register").await;
        debug!(email = %request.email, role = request.role.label(), "simulated registration");
        Ok(())
    }

    async fn verify_email(&self, request: VerificationRequest) -> Result<(), ActionError> {
        self.pause("verify_email").await;
        debug!(email = %request.email, "simulated email verification");
        Ok(())
    }

    async fn request_password_reset(&self, email: String) -> Result<(), ActionError> {
        self.pause("request_password_reset").await;
        debug!(%email, "simulated password reset email");
        Ok(())
    }

    async fn reset_password(&self, request: PasswordResetRequest) -> Result<(), ActionError> {
        self.pause("reset_password").await;
        debug!(email = %request.email, "simulated password reset");
        Ok(())
    }
}
