use std::sync::Arc;

use super::common::*;
use crate::flows::{AccountFlowService, AccountRole, ActionError, FlowError, Route};
use crate::forms::FormKind;

#[tokio::test]
async fn sign_up_routes_to_email_verification() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = AccountFlowService::new(gateway.clone());

    let transition = service.sign_up(sign_up_values()).await.expect("sign up");

    assert_eq!(transition.form, FormKind::SignUp);
    assert_eq!(
        transition.next,
        Route::VerifyEmail {
            email: "grace@example.com".to_string()
        }
    );
    let registrations = gateway.registrations();
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].role, AccountRole::Nanny);
    assert_eq!(registrations[0].full_name, "Grace Mensah");
    assert_eq!(registrations[0].phone, "515-555-0199");
}

#[tokio::test]
async fn invalid_forms_never_reach_the_gateway() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = AccountFlowService::new(gateway.clone());
    let mut input = sign_up_values();
    input.insert("confirm_password".to_string(), "Lullaby2025".to_string());

    match service.sign_up(input).await {
        Err(FlowError::Invalid { form, errors }) => {
            assert_eq!(form, FormKind::SignUp);
            assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
        }
        other => panic!("expected invalid form, got {other:?}"),
    }
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn sign_in_lands_on_role_home() {
    let client = simulated_service(AccountRole::Client)
        .sign_in(sign_in_values())
        .await
        .expect("client sign in");
    assert_eq!(client.next, Route::ClientHome);

    let nanny = simulated_service(AccountRole::Nanny)
        .sign_in(sign_in_values())
        .await
        .expect("nanny sign in");
    assert_eq!(nanny.next, Route::NannyHome);
    assert_eq!(nanny.next.path(), "/nanny/home");
}

#[tokio::test]
async fn password_reset_flow_returns_to_sign_in() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = AccountFlowService::new(gateway.clone());

    let requested = service
        .forgot_password(values(&[("email", "grace@example.com")]))
        .await
        .expect("reset requested");
    assert_eq!(
        requested.next,
        Route::ResetPassword {
            email: "grace@example.com".to_string()
        }
    );

    let reset = service
        .reset_password(values(&[
            ("email", "grace@example.com"),
            ("code", "314159"),
            ("password", "Bedtime99"),
            ("confirm_password", "Bedtime99"),
        ]))
        .await
        .expect("password reset");
    assert_eq!(reset.next, Route::SignIn);

    assert_eq!(
        gateway.calls(),
        vec![
            "request_password_reset:grace@example.com".to_string(),
            "reset_password:grace@example.com".to_string(),
        ]
    );
}

#[tokio::test]
async fn verify_email_passes_code_through() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = AccountFlowService::new(gateway.clone());

    let transition = service
        .submit(
            FormKind::VerifyEmail,
            values(&[("email", "grace@example.com"), ("code", "004211")]),
        )
        .await
        .expect("verified");

    assert_eq!(transition.next, Route::SignIn);
    assert_eq!(
        gateway.calls(),
        vec!["verify_email:grace@example.com:004211".to_string()]
    );
}

#[tokio::test]
async fn gateway_failures_surface_as_action_errors() {
    let service = AccountFlowService::new(Arc::new(FailingGateway(ActionError::Rejected(
        "email already registered".to_string(),
    ))));

    match service.sign_up(sign_up_values()).await {
        Err(error @ FlowError::Action { .. }) => {
            assert_eq!(error.form(), FormKind::SignUp);
            assert!(error.to_string().contains("email already registered"));
        }
        other => panic!("expected action error, got {other:?}"),
    }
}

#[tokio::test]
async fn simulated_gateway_waits_for_latency() {
    use crate::flows::SimulatedAccountGateway;
    use std::time::{Duration, Instant};

    let service = AccountFlowService::new(Arc::new(SimulatedAccountGateway::new(
        Duration::from_millis(20),
    )));
    let started = Instant::now();

    service
        .forgot_password(values(&[("email", "grace@example.com")]))
        .await
        .expect("reset requested");

    assert!(started.elapsed() >= Duration::from_millis(20));
}
