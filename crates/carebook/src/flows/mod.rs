//! Account screens wired to the backend seam.
//!
//! Each flow validates its form, turns the accepted values into a typed request, calls the
//! [`AccountGateway`], and answers with the next [`Route`]. The shipped gateway only
//! simulates latency; the error types are already in place for a real one.

pub mod domain;
pub mod gateway;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AccountRole, PasswordResetRequest, RegistrationRequest, Route, SignInRequest, Transition,
    VerificationRequest,
};
pub use gateway::{AccountGateway, ActionError, SimulatedAccountGateway};
pub use router::account_router;
pub use service::{AccountFlowService, FlowError};
