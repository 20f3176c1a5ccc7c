use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::gateway::{AccountGateway, ActionError};
use super::service::{AccountFlowService, FlowError};
use crate::forms::{FormKind, FormValues};

/// Router exposing form schemas, dry-run validation, and the account actions.
pub fn account_router<G>(service: Arc<AccountFlowService<G>>) -> Router
where
    G: AccountGateway + 'static,
{
    Router::new()
        .route("/api/v1/forms/:form", get(describe_handler))
        .route("/api/v1/forms/:form/validate", post(validate_handler::<G>))
        .route("/api/v1/account/:form", post(submit_handler::<G>))
        .with_state(service)
}

pub(crate) async fn describe_handler(Path(form): Path<String>) -> Response {
    match form.parse::<FormKind>() {
        Ok(kind) => {
            let payload = json!({
                "form": kind,
                "fields": kind.schema().describe(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => not_found(error.to_string()),
    }
}

pub(crate) async fn validate_handler<G>(
    State(service): State<Arc<AccountFlowService<G>>>,
    Path(form): Path<String>,
    Json(values): Json<FormValues>,
) -> Response
where
    G: AccountGateway + 'static,
{
    let kind = match form.parse::<FormKind>() {
        Ok(kind) => kind,
        Err(error) => return not_found(error.to_string()),
    };

    match service.validate(kind, &values) {
        Ok(_) => (StatusCode::OK, Json(json!({ "valid": true }))).into_response(),
        Err(error) => flow_error_response(error),
    }
}

pub(crate) async fn submit_handler<G>(
    State(service): State<Arc<AccountFlowService<G>>>,
    Path(form): Path<String>,
    Json(values): Json<FormValues>,
) -> Response
where
    G: AccountGateway + 'static,
{
    let kind = match form.parse::<FormKind>() {
        Ok(kind) => kind,
        Err(error) => return not_found(error.to_string()),
    };

    match service.submit(kind, values).await {
        Ok(transition) => {
            let payload = json!({
                "form": transition.form,
                "next": transition.next,
                "path": transition.next.path(),
                "message": transition.message,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => flow_error_response(error),
    }
}

pub(crate) fn flow_error_response(error: FlowError) -> Response {
    match error {
        FlowError::Invalid { form, errors } => {
            let payload = json!({
                "form": form,
                "valid": false,
                "errors": errors,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        FlowError::Action { form, source } => {
            let status = match source {
                ActionError::Rejected(_) => StatusCode::BAD_REQUEST,
                ActionError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            };
            let payload = json!({
                "form": form,
                "error": source.to_string(),
            });
            (status, Json(payload)).into_response()
        }
    }
}

fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}
