use std::sync::Arc;

use super::common::*;
use crate::workflows::decision::explain::{
    fallback_explanation, Explainer, Message, MessageRole,
};

#[test]
fn fallback_names_winner_drivers_and_gap() {
    let response = fallback_explanation(&explain_request(Vec::new()));

    assert!(response.explanation.contains("A公司"));
    assert!(response.explanation.contains("67.5"));
    // A's two largest contributions are impact (30.0) and risk (22.5).
    assert!(response.explanation.contains("impact(30.0)、risk(22.5)"));
    assert!(response.explanation.contains("22.5 分"));
    assert_eq!(response.highlights.len(), 2);
    assert_eq!(response.followups.len(), 2);
}

#[test]
fn fallback_keeps_a_decimal_on_whole_scores() {
    let mut request = explain_request(Vec::new());
    request.decision.score_breakdown.per_option[0].score = 60.0;
    request.decision.score_breakdown.per_option[1].score = 50.0;

    let response = fallback_explanation(&request);

    assert!(response.explanation.contains("（60.0）"));
    assert!(response.explanation.contains("领先第二名约 10.0 分。"));
    assert_eq!(response.highlights[0], "最佳选项：A公司（60.0）");
}

#[test]
fn fallback_flags_assumptions() {
    let response = fallback_explanation(&explain_request(vec!["defaulted".to_string()]));

    assert_eq!(response.highlights.len(), 3);
}

#[test]
fn fallback_omits_gap_for_single_option() {
    let mut request = explain_request(Vec::new());
    request.decision.score_breakdown.per_option.truncate(1);

    let response = fallback_explanation(&request);

    assert!(!response.explanation.contains("领先"));
}

#[tokio::test]
async fn offline_explainer_uses_template() {
    let explainer = Explainer::<ScriptedClient>::offline();
    let request = explain_request(Vec::new());

    let response = explainer.explain(&request).await;

    assert!(explainer.is_offline());
    assert_eq!(response, fallback_explanation(&request));
}

#[tokio::test]
async fn model_output_is_used_when_valid() {
    let client = Arc::new(ScriptedClient::replying(
        "```json\n{\"explanation\": \"A公司 fits best\", \"highlights\": [\"impact\"], \"followups\": []}\n```",
    ));
    let explainer = Explainer::new(client.clone());
    let mut request = explain_request(Vec::new());
    request.messages.push(Message {
        role: MessageRole::User,
        content: "why not B?".to_string(),
    });

    let response = explainer.explain(&request).await;

    assert_eq!(response.explanation, "A公司 fits best");
    assert_eq!(client.calls(), 1);
    let prompt = client.last_prompt();
    assert_eq!(prompt.len(), 3);
    assert_eq!(prompt[0].role, MessageRole::System);
    assert!(prompt[1].content.contains("\"best_option\":\"A公司\""));
    assert_eq!(prompt[2].content, "why not B?");
}

#[tokio::test]
async fn transport_failures_fall_back() {
    let client = Arc::new(ScriptedClient::failing());
    let explainer = Explainer::new(client.clone());
    let request = explain_request(Vec::new());

    let response = explainer.explain(&request).await;

    assert_eq!(client.calls(), 1);
    assert_eq!(response, fallback_explanation(&request));
}

#[tokio::test]
async fn unusable_model_output_falls_back() {
    let explainer = Explainer::new(Arc::new(ScriptedClient::replying(
        "{\"summary\": \"wrong shape\"}",
    )));
    let request = explain_request(Vec::new());

    let response = explainer.explain(&request).await;

    assert_eq!(response, fallback_explanation(&request));
}
