//! REST client for `GET /repos/{owner}/{repo}/issues`.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use triage_core::{Error, Issue, IssueNumber, Result};

use crate::source::IssueSource;

/// Public GitHub REST API root.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Largest page size the issues endpoint accepts.
const PER_PAGE: u32 = 100;

/// Hard stop for pagination (100 000 issues).
const MAX_PAGES: u32 = 1000;

/// `owner/repo` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::str::FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::validation_field(
                "repo",
                format!("expected 'owner/repo', got '{s}'"),
            )),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Issue object as returned by the API; only the fields we use.
#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u64,
    title: String,
    html_url: String,
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// GitHub issues client for one repository.
pub struct GitHubClient {
    repo: RepoSlug,
    token: Option<String>,
    api_base: String,
    http_client: reqwest::Client,
}

impl GitHubClient {
    /// Creates a client for `repo`, authenticated when `token` is given.
    pub fn new(repo: RepoSlug, token: Option<String>) -> Self {
        Self {
            repo,
            token: token.filter(|t| !t.trim().is_empty()),
            api_base: GITHUB_API_BASE.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Points the client at another API root (GitHub Enterprise, test server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Repository this client reads.
    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    async fn fetch_page(&self, page: u32, since: Option<&str>) -> Result<Vec<RawIssue>> {
        let url = format!(
            "{}/repos/{}/{}/issues",
            self.api_base, self.repo.owner, self.repo.name
        );

        let mut query: Vec<(&str, String)> = vec![
            ("state", "open".to_string()),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(since) = since {
            query.push(("since", since.to_string()));
        }

        let mut request = self
            .http_client
            .get(&url)
            .query(&query)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(
                reqwest::header::USER_AGENT,
                concat!("triage/", env!("CARGO_PKG_VERSION")),
            );
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::github(format!("issues request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiMessage>(&text)
                .map(|m| m.message)
                .unwrap_or(text);
            return Err(Error::github_status(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| Error::github(format!("invalid issues response: {e}")))
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    async fn open_issues(&self, since: Option<&str>) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        let mut pull_requests = 0usize;

        for page in 1..=MAX_PAGES {
            let chunk = self.fetch_page(page, since).await?;
            if chunk.is_empty() {
                break;
            }
            tracing::debug!(repo = %self.repo, page, items = chunk.len(), "Fetched issues page");

            for raw in chunk {
                if raw.pull_request.is_some() {
                    pull_requests += 1;
                    continue;
                }
                issues.push(Issue {
                    number: IssueNumber::new(raw.number),
                    title: raw.title,
                    html_url: raw.html_url,
                });
            }

            if page == MAX_PAGES {
                tracing::warn!(repo = %self.repo, "Stopped paginating at page limit");
            }
        }

        tracing::info!(
            repo = %self.repo,
            since = since.unwrap_or("-"),
            issues = issues.len(),
            skipped_pull_requests = pull_requests,
            "Fetched open issues"
        );
        Ok(issues)
    }
}
