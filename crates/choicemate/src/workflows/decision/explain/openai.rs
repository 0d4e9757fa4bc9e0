use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::{ExplainError, Message, NarrativeClient};
use crate::config::LlmConfig;

const TEMPERATURE: f32 = 0.3;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionsClient {
    config: LlmConfig,
    http: Client,
}

impl ChatCompletionsClient {
    pub fn new(config: LlmConfig) -> Result<Self, ExplainError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ExplainError::Transport(err.to_string()))?;
        Ok(Self { config, http })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl NarrativeClient for ChatCompletionsClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, ExplainError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| ExplainError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplainError::Status(status.as_u16()));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|err| ExplainError::Transport(err.to_string()))?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ExplainError::MissingContent)
    }
}
