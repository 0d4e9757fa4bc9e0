//! Natural-language explanation of a decision.
//!
//! An OpenAI-compatible chat endpoint is asked for a JSON explanation when one is
//! configured. Any failure along that path, including unusable model output,
//! degrades to a deterministic template built from the score breakdown.

mod fallback;
mod openai;
mod prompt;

pub use fallback::fallback_explanation;
pub use openai::ChatCompletionsClient;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{CompletionRecord, Decision, Facts};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplainRequest {
    pub problem: String,
    pub options: Vec<String>,
    pub facts: Facts,
    pub decision: Decision,
    #[serde(default, rename = "facts_completion")]
    pub completions: Vec<CompletionRecord>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    /// Prior conversation turns, appended after the generated context.
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub style: Option<Style>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplainResponse {
    pub explanation: String,
    pub highlights: Vec<String>,
    pub followups: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Style {
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
}

/// Reasons the model path was abandoned. Logged, never returned to callers.
#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    #[error("could not build the explanation context: {0}")]
    Context(#[from] serde_json::Error),
    #[error("llm transport failed: {0}")]
    Transport(String),
    #[error("llm responded with status {0}")]
    Status(u16),
    #[error("llm response carried no message content")]
    MissingContent,
    #[error("llm output is not a JSON object")]
    NotJson,
    #[error("llm output does not match the explanation shape: {0}")]
    Shape(String),
}

/// Seam to the external chat model.
#[async_trait]
pub trait NarrativeClient: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String, ExplainError>;
}

pub struct Explainer<C> {
    client: Option<Arc<C>>,
}

impl<C> Clone for Explainer<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<C> Explainer<C>
where
    C: NarrativeClient,
{
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Explainer that always answers with the template.
    pub fn offline() -> Self {
        Self { client: None }
    }

    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    pub async fn explain(&self, request: &ExplainRequest) -> ExplainResponse {
        let Some(client) = &self.client else {
            return fallback_explanation(request);
        };

        match ask(client.as_ref(), request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "explanation fell back to template");
                fallback_explanation(request)
            }
        }
    }
}

async fn ask<C: NarrativeClient>(
    client: &C,
    request: &ExplainRequest,
) -> Result<ExplainResponse, ExplainError> {
    let messages = prompt::build_messages(request)?;
    let content = client.complete(&messages).await?;
    prompt::parse_model_output(&content)
}
