use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::decision::domain::{ConversationState, Facts, Ratings, Weights};
use crate::workflows::decision::explain::{ExplainError, Explainer, Message, NarrativeClient};
use crate::workflows::decision::questionnaire::QuestionnaireRequest;
use crate::workflows::decision::service::DecisionService;
use crate::workflows::decision::{decision_router, decide, ExplainRequest};

pub(super) const PROBLEM: &str = "去哪工作";

pub(super) fn options() -> Vec<String> {
    vec!["A公司".to_string(), "B公司".to_string()]
}

pub(super) fn reference_weights() -> Weights {
    Weights {
        impact: 4.0,
        cost: 2.0,
        risk: 3.0,
        reversibility: 1.0,
    }
}

pub(super) fn weights_answer() -> Value {
    json!({"weights": {"impact": 4, "cost": 2, "risk": 3, "reversibility": 1}})
}

pub(super) fn ratings_answer() -> Value {
    json!({
        "option_ratings": {
            "A公司": {"impact": 4, "cost": null, "risk": 2, "reversibility": 3},
            "B公司": {"impact": 3, "cost": 2, "risk": 4, "reversibility": 2}
        }
    })
}

pub(super) fn request(state: Option<ConversationState>, last_answer: Option<Value>) -> QuestionnaireRequest {
    QuestionnaireRequest {
        problem: PROBLEM.to_string(),
        options: options(),
        state,
        last_answer,
    }
}

/// Complete facts matching the reference flow once A's cost is defaulted to 3.
pub(super) fn reference_facts() -> Facts {
    let mut option_ratings = BTreeMap::new();
    option_ratings.insert(
        "A公司".to_string(),
        Ratings {
            impact: 4.0,
            cost: 3.0,
            risk: 2.0,
            reversibility: 3.0,
        },
    );
    option_ratings.insert(
        "B公司".to_string(),
        Ratings {
            impact: 3.0,
            cost: 2.0,
            risk: 4.0,
            reversibility: 2.0,
        },
    );
    Facts {
        weights: reference_weights(),
        option_ratings,
    }
}

pub(super) fn explain_request(assumptions: Vec<String>) -> ExplainRequest {
    let facts = reference_facts();
    let decision = decide(&facts, &options()).expect("reference facts decide");
    ExplainRequest {
        problem: PROBLEM.to_string(),
        options: options(),
        facts,
        decision,
        completions: Vec::new(),
        assumptions,
        messages: Vec::new(),
        style: None,
    }
}

/// Narrative client that replays a canned reply and records every prompt.
#[derive(Default)]
pub(super) struct ScriptedClient {
    reply: Option<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedClient {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub(super) fn failing() -> Self {
        Self::default()
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn last_prompt(&self) -> Vec<Message> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl NarrativeClient for ScriptedClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, ExplainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(messages.to_vec());
        self.reply
            .clone()
            .ok_or_else(|| ExplainError::Transport("connection refused".to_string()))
    }
}

pub(super) fn offline_service() -> DecisionService<ScriptedClient> {
    DecisionService::new(Explainer::offline())
}

pub(super) fn decision_router_with_service(service: DecisionService<ScriptedClient>) -> axum::Router {
    decision_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
