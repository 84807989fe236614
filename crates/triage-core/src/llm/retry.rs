//! Retry wrapper for transient LLM failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};

use super::provider::{CompletionRequest, CompletionResponse, LlmProvider};
use crate::{Error, Result};

const DEFAULT_MAX_RETRIES: usize = 3;

/// Retries retryable provider errors with exponential backoff.
pub struct RetryWrapper {
    inner: Arc<dyn LlmProvider>,
    backoff: ExponentialBuilder,
}

impl RetryWrapper {
    /// Wraps `inner` with three retries starting at one second.
    pub fn new(inner: Arc<dyn LlmProvider>) -> Self {
        Self::with_policy(inner, DEFAULT_MAX_RETRIES, Duration::from_secs(1))
    }

    /// Wraps `inner` with a custom retry budget and initial delay.
    pub fn with_policy(inner: Arc<dyn LlmProvider>, max_retries: usize, min_delay: Duration) -> Self {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(min_delay)
            .with_max_delay(Duration::from_secs(30))
            .with_max_times(max_retries);
        Self { inner, backoff }
    }
}

#[async_trait]
impl LlmProvider for RetryWrapper {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let attempt = || {
            let inner = Arc::clone(&self.inner);
            let request = request.clone();
            async move { inner.complete(request).await }
        };

        attempt
            .retry(self.backoff.clone())
            .when(Error::is_retryable)
            .notify(|err: &Error, delay: Duration| {
                tracing::warn!(error = %err, delay_ms = delay.as_millis() as u64, "Retrying LLM call");
            })
            .await
    }
}
