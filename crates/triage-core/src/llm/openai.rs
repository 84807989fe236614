//! OpenAI-compatible chat-completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::{CompletionRequest, CompletionResponse, LlmProvider, Message, TokenUsage};
use crate::{Error, Result};

/// Public OpenAI API root.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// Low temperature keeps classifications stable between runs.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Per-request timeout; large triage batches take a while to classify.
const REQUEST_TIMEOUT_SECS: u64 = 180;

/// Chat-completions provider for OpenAI and API-compatible servers.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiProvider {
    /// Creates a provider against the public OpenAI API.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_API_BASE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Points the provider at another API root (proxy, Azure-style gateway, test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the default temperature for requests that do not carry one.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model name sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body(&self, request: CompletionRequest) -> ChatRequest<'_> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = request.system_prompt {
            messages.push(Message::system(system));
        }
        messages.extend(request.messages);

        ChatRequest {
            model: &self.model,
            messages,
            temperature: request.temperature.unwrap_or(self.temperature),
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_body(request);

        tracing::debug!(model = %self.model, messages = body.messages.len(), "Sending chat completion");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout {
                        seconds: REQUEST_TIMEOUT_SECS,
                    }
                } else {
                    Error::llm_with_source("chat completion request failed", e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or(text);
            return Err(match status.as_u16() {
                401 | 403 => Error::config(format!("chat API rejected credentials: {message}")),
                429 | 500..=599 => Error::llm(format!("chat API returned {status}: {message}")),
                _ => Error::validation(format!("chat API returned {status}: {message}")),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::llm_with_source("invalid chat completion response", e))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::llm("chat completion returned no content"))?;

        let tokens_used = parsed
            .usage
            .map(|u| TokenUsage {
                input: u.prompt_tokens,
                output: u.completion_tokens,
            })
            .unwrap_or_default();

        tracing::debug!(tokens = tokens_used.total(), "Chat completion received");

        Ok(CompletionResponse {
            content,
            tokens_used,
        })
    }
}
