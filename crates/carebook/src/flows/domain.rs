use serde::{Deserialize, Serialize};

use crate::forms::FormKind;

/// Which side of the marketplace an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// A parent booking care.
    Client,
    Nanny,
}

impl AccountRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "client" => Some(Self::Client),
            "nanny" => Some(Self::Nanny),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AccountRole::Client => "client",
            AccountRole::Nanny => "nanny",
        }
    }
}

/// Navigation targets reachable from the account screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Route {
    SignIn,
    VerifyEmail { email: String },
    ResetPassword { email: String },
    ClientHome,
    NannyHome,
}

impl Route {
    pub fn home_for(role: AccountRole) -> Self {
        match role {
            AccountRole::Client => Route::ClientHome,
            AccountRole::Nanny => Route::NannyHome,
        }
    }

    pub const fn path(&self) -> &'static str {
        match self {
            Route::SignIn => "/auth/sign-in",
            Route::VerifyEmail { .. } => "/auth/verify-email",
            Route::ResetPassword { .. } => "/auth/reset-password",
            Route::ClientHome => "/client/home",
            Route::NannyHome => "/nanny/home",
        }
    }
}

/// Result of a successful screen action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub form: FormKind,
    pub next: Route,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: AccountRole,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetRequest {
    pub email: String,
    pub code: String,
    pub password: String,
}
