//! The issue source seam and its in-memory implementation.

use std::sync::Mutex;

use async_trait::async_trait;
use triage_core::{Issue, Result};

/// Something that lists open issues of one repository.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Open issues, pull requests excluded.
    ///
    /// With `since`, only issues updated at or after that ISO-8601 instant.
    async fn open_issues(&self, since: Option<&str>) -> Result<Vec<Issue>>;
}

/// Issue source backed by in-memory lists.
///
/// `changed` answers queries with a `since` filter, `all` answers the
/// unfiltered ones. Queries are recorded.
pub struct StaticIssueSource {
    changed: Vec<Issue>,
    all: Vec<Issue>,
    queries: Mutex<Vec<Option<String>>>,
}

impl StaticIssueSource {
    /// Same list for filtered and unfiltered queries.
    pub fn new(issues: Vec<Issue>) -> Self {
        Self::with_changed(issues.clone(), issues)
    }

    /// Distinct lists for `since` queries and full listings.
    pub fn with_changed(changed: Vec<Issue>, all: Vec<Issue>) -> Self {
        Self {
            changed,
            all,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// `since` values received so far (`None` for full listings).
    pub fn queries(&self) -> Vec<Option<String>> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl IssueSource for StaticIssueSource {
    async fn open_issues(&self, since: Option<&str>) -> Result<Vec<Issue>> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(since.map(str::to_string));
        Ok(match since {
            Some(_) => self.changed.clone(),
            None => self.all.clone(),
        })
    }
}
