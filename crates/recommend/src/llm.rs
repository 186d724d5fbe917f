use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{RecommendError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Connection settings for the chat-completion service.
#[derive(Debug)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: SecretString,
    /// Whole-request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl LlmConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key,
            timeout: None,
        }
    }
}

/// Single-shot client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    base_url: String,
    model: String,
    api_key: SecretString,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            api_key: config.api_key,
            client: builder.build()?,
        })
    }

    /// Send `prompt` as a single user message and return the first choice's
    /// text.
    ///
    /// Exactly one request is made. A reply with no choices, or a choice
    /// without content, is `Ok(None)`.
    pub async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.model, prompt = %prompt, "Sending chat completion request");
        let started = Instant::now();

        let response = self.client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecommendError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        info!(
            model = %self.model,
            prompt_len = prompt.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            has_content = content.is_some(),
            "Chat completion finished"
        );
        if let Some(text) = &content {
            debug!(reply = %text, "Chat completion reply");
        }

        Ok(content)
    }
}

/// Prefer the service's own error message over the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}
