use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use choicemate::workflows::decision::{decision_router, DecisionService, NarrativeClient};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_decision_routes<C>(service: Arc<DecisionService<C>>) -> axum::Router
where
    C: NarrativeClient + 'static,
{
    decision_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/healthz", axum::routing::get(liveness))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Liveness probe kept for clients of the earlier `/healthz` contract.
pub(crate) async fn liveness() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
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
