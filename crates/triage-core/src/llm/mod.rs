//! LLM provider abstraction.
//!
//! The triage pipeline talks to the model through [`LlmProvider`]. The
//! production implementation is [`OpenAiProvider`]; tests use
//! [`MockLlmProvider`]. [`RetryWrapper`] adds exponential backoff around any
//! provider.

mod mock;
mod openai;
mod provider;
mod retry;

pub use mock::MockLlmProvider;
pub use openai::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, OPENAI_API_BASE, OpenAiProvider};
pub use provider::{CompletionRequest, CompletionResponse, LlmProvider, Message, Role, TokenUsage};
pub use retry::RetryWrapper;
