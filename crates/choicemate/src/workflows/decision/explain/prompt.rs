use serde_json::{json, Value};

use super::{ExplainError, ExplainRequest, ExplainResponse, Message, MessageRole};

const SYSTEM_PROMPT: &str = "你是一个理性的决策解释助手。\
输出必须是 JSON，且只包含 explanation, highlights, followups 三个字段。\
语气清晰中立，避免绝对化承诺或保证正确的说法。";

const CONTEXT_PREAMBLE: &str = "以下是决策上下文（JSON）:\n";

/// System prompt, the decision context as JSON, then the caller's prior turns.
pub(super) fn build_messages(request: &ExplainRequest) -> Result<Vec<Message>, ExplainError> {
    let context = json!({
        "problem": request.problem,
        "options": request.options,
        "facts": request.facts,
        "decision": request.decision,
        "facts_completion": request.completions,
        "assumptions": request.assumptions,
        "style": request.style.clone().unwrap_or_default(),
    });
    let context = serde_json::to_string(&context)?;

    let mut messages = Vec::with_capacity(request.messages.len() + 2);
    messages.push(Message {
        role: MessageRole::System,
        content: SYSTEM_PROMPT.to_string(),
    });
    messages.push(Message {
        role: MessageRole::User,
        content: format!("{CONTEXT_PREAMBLE}{context}"),
    });
    messages.extend(request.messages.iter().cloned());
    Ok(messages)
}

/// Accepts bare JSON or JSON wrapped in prose/code fences.
pub(super) fn parse_model_output(content: &str) -> Result<ExplainResponse, ExplainError> {
    let value = serde_json::from_str::<Value>(content)
        .ok()
        .or_else(|| embedded_object(content))
        .ok_or(ExplainError::NotJson)?;

    serde_json::from_value(value).map_err(|err| ExplainError::Shape(err.to_string()))
}

fn embedded_object(content: &str) -> Option<Value> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&content[start..=end]).ok()
}
