use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::explain::{ExplainRequest, NarrativeClient};
use super::questionnaire::QuestionnaireRequest;
use super::service::{DecideRequest, DecisionService, DecisionServiceError};

/// Router builder exposing the questionnaire, decide, and explain endpoints.
pub fn decision_router<C>(service: Arc<DecisionService<C>>) -> Router
where
    C: NarrativeClient + 'static,
{
    Router::new()
        .route("/questionnaire/next", post(questionnaire_handler::<C>))
        .route("/decide", post(decide_handler::<C>))
        .route("/explain", post(explain_handler::<C>))
        .with_state(service)
}

pub(crate) async fn questionnaire_handler<C>(
    State(service): State<Arc<DecisionService<C>>>,
    axum::Json(request): axum::Json<QuestionnaireRequest>,
) -> Response
where
    C: NarrativeClient + 'static,
{
    match service.next_step(&request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decide_handler<C>(
    State(service): State<Arc<DecisionService<C>>>,
    axum::Json(request): axum::Json<DecideRequest>,
) -> Response
where
    C: NarrativeClient + 'static,
{
    match service.decide(&request) {
        Ok(decision) => (StatusCode::OK, axum::Json(decision)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn explain_handler<C>(
    State(service): State<Arc<DecisionService<C>>>,
    axum::Json(request): axum::Json<ExplainRequest>,
) -> Response
where
    C: NarrativeClient + 'static,
{
    let explanation = service.explain(&request).await;
    (StatusCode::OK, axum::Json(explanation)).into_response()
}

pub(crate) fn error_response(error: DecisionServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "kind": error.kind(),
    });
    (error.status(), axum::Json(payload)).into_response()
}
