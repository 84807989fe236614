//! Scripted LLM provider.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::provider::{CompletionRequest, CompletionResponse, LlmProvider, TokenUsage};
use crate::{Error, Result};

/// Scripted provider for tests and dry runs.
///
/// Returns the queued responses in order; once exhausted, keeps returning
/// the last one. Every request is recorded for inspection.
pub struct MockLlmProvider {
    responses: Vec<String>,
    cursor: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmProvider {
    /// Creates a mock with the given response sequence.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            cursor: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that always answers `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of `complete` calls made.
    pub fn call_count(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        let content = self
            .responses
            .get(index)
            .or_else(|| self.responses.last())
            .cloned()
            .ok_or_else(|| Error::llm("mock provider has no responses"))?;

        let words = content.split_whitespace().count();
        Ok(CompletionResponse {
            tokens_used: TokenUsage {
                input: 0,
                output: u32::try_from(words).unwrap_or(u32::MAX),
            },
            content,
        })
    }
}
