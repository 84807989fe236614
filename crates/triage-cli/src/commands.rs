//! The `run` command: wires the configured clients into a triage workflow.

use std::sync::Arc;
use std::time::Duration;

use triage_core::llm::{LlmProvider, OpenAiProvider, RetryWrapper};
use triage_core::{Error, Result};
use triage_github::GitHubClient;
use triage_workflows::{TriageOutcome, TriageSettings, TriageWorkflow};

use crate::config::TriageConfig;

/// First retry delay for transient model failures.
const RETRY_MIN_DELAY: Duration = Duration::from_secs(1);

/// Secrets read from the environment.
#[derive(Clone, Default)]
pub struct Credentials {
    /// GitHub token; anonymous requests when absent
    pub github_token: Option<String>,
    /// Chat-completions API key
    pub openai_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    /// Reads `GITHUB_TOKEN` and `OPENAI_API_KEY` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads credentials through `lookup`; blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        Self {
            github_token: read("GITHUB_TOKEN"),
            openai_api_key: read("OPENAI_API_KEY"),
        }
    }
}

/// Builds the workflow described by `config`.
pub fn build_workflow(
    config: &TriageConfig,
    credentials: Credentials,
    write_wiki: bool,
) -> Result<TriageWorkflow> {
    let api_key = credentials
        .openai_api_key
        .ok_or_else(|| Error::config("OPENAI_API_KEY is not set"))?;

    if credentials.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN is not set, using unauthenticated GitHub requests");
    }

    let temperature = config.llm.temperature as f32;
    let provider = OpenAiProvider::new(api_key, &config.llm.model)
        .with_base_url(&config.llm.api_base)
        .with_temperature(temperature);
    let llm: Arc<dyn LlmProvider> = Arc::new(RetryWrapper::with_policy(
        Arc::new(provider),
        config.llm.max_retries,
        RETRY_MIN_DELAY,
    ));

    let github = GitHubClient::new(config.repo_slug()?, credentials.github_token)
        .with_api_base(&config.github.api_base);

    let settings = TriageSettings {
        repo: config.repo.clone(),
        themes: config.themes.clone(),
        paths: config.paths.clone(),
        temperature,
        write_wiki,
    };

    tracing::debug!(
        repo = %config.repo,
        model = %config.llm.model,
        themes = config.themes.len(),
        "Triage workflow configured"
    );

    Ok(TriageWorkflow::new(llm, Arc::new(github), settings))
}

/// Runs one triage pass.
///
/// With `stdout` the wiki page is printed instead of written to its file.
pub async fn cmd_run(
    config: &TriageConfig,
    credentials: Credentials,
    stdout: bool,
) -> Result<TriageOutcome> {
    let workflow = build_workflow(config, credentials, !stdout)?;
    let outcome = workflow.run().await?;

    match &outcome {
        TriageOutcome::Unchanged { since } => {
            tracing::info!("No issues updated since {since}");
        }
        TriageOutcome::Updated(report) => {
            if stdout {
                print!("{}", report.wiki_markdown);
            } else {
                tracing::info!(
                    "Created {} ({} classified, {} removed)",
                    config.paths.wiki_file.display(),
                    report.classified,
                    report.removed.len()
                );
            }
        }
    }

    Ok(outcome)
}
