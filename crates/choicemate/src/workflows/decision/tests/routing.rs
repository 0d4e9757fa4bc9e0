use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::decision::router::{decide_handler, questionnaire_handler};
use crate::workflows::decision::service::DecideRequest;

async fn post_json(router: axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");
    let status = response.status();
    (status, read_json_body(response).await)
}

#[tokio::test]
async fn questionnaire_route_walks_all_three_rounds() {
    let router = decision_router_with_service(offline_service());

    let (status, first) = post_json(
        router.clone(),
        "/questionnaire/next",
        json!({"problem": PROBLEM, "options": options()}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["round"], 1);
    assert_eq!(first["question"]["type"], "weights_sliders");
    assert!(first["decision"].is_null());

    let (status, second) = post_json(
        router.clone(),
        "/questionnaire/next",
        json!({
            "problem": PROBLEM,
            "options": options(),
            "state": first["state"],
            "last_answer": weights_answer(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["round"], 2);
    assert_eq!(second["question"]["type"], "ratings_matrix");
    assert_eq!(second["state"]["facts"]["weights"]["impact"], 4.0);

    let (status, third) = post_json(
        router,
        "/questionnaire/next",
        json!({
            "problem": PROBLEM,
            "options": options(),
            "state": second["state"],
            "last_answer": ratings_answer(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(third["round"], 3);
    assert!(third["question"].is_null());
    assert_eq!(third["decision"]["best_option"], "A公司");
    assert_eq!(third["decision"]["confidence"], "high");
    assert_eq!(
        third["facts_completion"],
        json!([{"option": "A公司", "dimension": "cost", "filled_value": 3.0, "source": "default"}])
    );
}

#[tokio::test]
async fn questionnaire_route_reports_invalid_state() {
    let router = decision_router_with_service(offline_service());

    let (status, body) = post_json(
        router,
        "/questionnaire/next",
        json!({
            "problem": PROBLEM,
            "options": options(),
            "state": {"round": 5, "facts": {}, "draft_meta": {}},
            "last_answer": weights_answer(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_state");
}

#[tokio::test]
async fn negative_round_maps_to_invalid_state() {
    let router = decision_router_with_service(offline_service());

    let (status, body) = post_json(
        router,
        "/questionnaire/next",
        json!({
            "problem": PROBLEM,
            "options": options(),
            "state": {"round": -1, "facts": {}, "draft_meta": {}},
            "last_answer": weights_answer(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_state");
    assert!(body["error"].as_str().unwrap_or_default().contains("-1"));
}

#[tokio::test]
async fn questionnaire_handler_reports_validation_field() {
    let service = Arc::new(offline_service());
    let mut request = request(None, None);
    request.problem = String::new();

    let response = questionnaire_handler(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "validation");
    assert!(body["error"].as_str().unwrap_or_default().starts_with("problem"));
}

#[tokio::test]
async fn decide_handler_scores_complete_facts() {
    let service = Arc::new(offline_service());
    let request = DecideRequest {
        problem: PROBLEM.to_string(),
        options: options(),
        facts: reference_facts(),
    };

    let response = decide_handler(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["best_option"], "A公司");
    assert_eq!(body["score_breakdown"]["per_option"][0]["score"], 67.5);
    assert_eq!(
        body["score_breakdown"]["dimensions"],
        json!(["impact", "cost", "risk", "reversibility"])
    );
}

#[tokio::test]
async fn decide_route_rejects_options_without_ratings() {
    let router = decision_router_with_service(offline_service());

    let (status, body) = post_json(
        router,
        "/decide",
        json!({
            "problem": PROBLEM,
            "options": ["A公司", "B公司", "C公司"],
            "facts": reference_facts(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
    assert!(body["error"].as_str().unwrap_or_default().contains("C公司"));
}

#[tokio::test]
async fn explain_route_returns_fallback_offline() {
    let router = decision_router_with_service(offline_service());
    let request = explain_request(vec!["assumed".to_string()]);

    let (status, body) = post_json(
        router,
        "/explain",
        serde_json::to_value(&request).expect("serializes"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["explanation"]
        .as_str()
        .unwrap_or_default()
        .contains("A公司"));
    assert_eq!(body["highlights"].as_array().map(Vec::len), Some(3));
}
