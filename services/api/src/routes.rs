use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use carebook::checklist::{Checklist, ChecklistItem};
use carebook::fixtures::{
    bank_accounts, nannies, orders, orders_with_status, wallet_summary, BankAccount,
    BookingOrder, NannyProfile, OrderStatus, WalletSummary,
};
use carebook::flows::{account_router, AccountFlowService, AccountGateway};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrdersQuery {
    #[serde(default)]
    pub(crate) status: Option<OrderStatus>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrderView {
    #[serde(flatten)]
    pub(crate) order: BookingOrder,
    pub(crate) status_label: &'static str,
    pub(crate) total_cents: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReorderRequest {
    pub(crate) items: Vec<ChecklistItem>,
    pub(crate) from: usize,
    pub(crate) to: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReorderResponse {
    pub(crate) items: Vec<ChecklistItem>,
    pub(crate) completed: usize,
}

pub(crate) fn with_account_routes<G>(service: Arc<AccountFlowService<G>>) -> axum::Router
where
    G: AccountGateway + 'static,
{
    account_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/orders", axum::routing::get(orders_endpoint))
        .route("/api/v1/wallet", axum::routing::get(wallet_endpoint))
        .route(
            "/api/v1/bank-accounts",
            axum::routing::get(bank_accounts_endpoint),
        )
        .route("/api/v1/nannies", axum::routing::get(nannies_endpoint))
        .route(
            "/api/v1/checklists/reorder",
            axum::routing::post(reorder_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn orders_endpoint(
    axum::extract::Query(query): axum::extract::Query<OrdersQuery>,
) -> Json<Vec<OrderView>> {
    let selected = match query.status {
        Some(status) => orders_with_status(status),
        None => orders(),
    };

    Json(
        selected
            .into_iter()
            .map(|order| OrderView {
                status_label: order.status.label(),
                total_cents: order.total_cents(),
                order,
            })
            .collect(),
    )
}

pub(crate) async fn wallet_endpoint() -> Json<WalletSummary> {
    Json(wallet_summary())
}

pub(crate) async fn bank_accounts_endpoint() -> Json<Vec<BankAccount>> {
    Json(bank_accounts())
}

pub(crate) async fn nannies_endpoint() -> Json<Vec<NannyProfile>> {
    Json(nannies())
}

pub(crate) async fn reorder_endpoint(Json(payload): Json<ReorderRequest>) -> Response {
    let ReorderRequest { items, from, to } = payload;
    let mut checklist = Checklist::new(items);

    match checklist.reorder(from, to) {
        Ok(_) => {
            let completed = checklist.completed();
            let body = ReorderResponse {
                items: checklist.items().to_vec(),
                completed,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use carebook::checklist::ItemId;
    use carebook::flows::SimulatedAccountGateway;
    use std::time::Duration;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let gateway = Arc::new(SimulatedAccountGateway::new(Duration::ZERO));
        with_account_routes(Arc::new(AccountFlowService::new(gateway)))
    }

    async fn read_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn item(id: &str) -> ChecklistItem {
        ChecklistItem {
            id: ItemId(id.to_string()),
            label: id.to_string(),
            done: id == "snack",
        }
    }

    #[tokio::test]
    async fn orders_endpoint_filters_by_status() {
        let Json(all) = orders_endpoint(axum::extract::Query(OrdersQuery::default())).await;
        assert_eq!(all.len(), 4);

        let Json(completed) = orders_endpoint(axum::extract::Query(OrdersQuery {
            status: Some(OrderStatus::Completed),
        }))
        .await;
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].status_label, "Completed");
        assert_eq!(completed[0].total_cents, 14_400);
    }

    #[tokio::test]
    async fn wallet_route_serves_summary() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/wallet")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["balance_cents"], 19_600);
        assert_eq!(body["transactions"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn health_route_is_mounted_next_to_account_routes() {
        let response = router()
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router()
            .oneshot(
                Request::get("/api/v1/forms/reset-password")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn reorder_endpoint_moves_items() {
        let request = ReorderRequest {
            items: vec![item("nap"), item("snack"), item("park")],
            from: 2,
            to: 0,
        };

        let response = reorder_endpoint(Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["items"][0]["id"], "park");
        assert_eq!(body["completed"], 1);
    }

    #[tokio::test]
    async fn reorder_endpoint_rejects_bad_positions() {
        let request = ReorderRequest {
            items: vec![item("nap")],
            from: 0,
            to: 3,
        };

        let response = reorder_endpoint(Json(request)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
