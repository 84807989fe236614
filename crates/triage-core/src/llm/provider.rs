use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A chat-completion backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends a request and returns the model's reply.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// End-user content
    User,
    /// Model reply
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who is speaking
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// A completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Conversation so far
    pub messages: Vec<Message>,
    /// Optional system prompt, sent before `messages`
    pub system_prompt: Option<String>,
    /// Upper bound on generated tokens
    pub max_tokens: Option<u32>,
    /// Sampling temperature; provider default when unset
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a request from messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            system_prompt: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the max token budget.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    /// Prompt tokens
    pub input: u32,
    /// Generated tokens
    pub output: u32,
}

impl TokenUsage {
    /// Prompt plus generated tokens.
    pub fn total(&self) -> u32 {
        self.input.saturating_add(self.output)
    }
}

/// The model's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated text
    pub content: String,
    /// Token accounting
    pub tokens_used: TokenUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = CompletionRequest::new(vec![Message::user("hi")])
            .with_system_prompt("be brief")
            .with_max_tokens(10)
            .with_temperature(0.2);
        assert_eq!(req.messages[0].role, Role::User);
        assert_eq!(req.system_prompt.as_deref(), Some("be brief"));
        assert_eq!(req.max_tokens, Some(10));
        assert_eq!(req.temperature, Some(0.2));
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage { input: 7, output: 5 };
        assert_eq!(usage.total(), 12);

        let huge = TokenUsage {
            input: u32::MAX,
            output: 1,
        };
        assert_eq!(huge.total(), u32::MAX);
    }
}
