//! Fetch → classify → cache → render.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use triage_core::classify::{build_prompt, parse_classification};
use triage_core::llm::{CompletionRequest, LlmProvider, Message};
use triage_core::render::render_wiki;
use triage_core::{ClassificationCache, Error, Issue, IssueNumber, Result, SyncStamp, ThemeSet};
use triage_github::IssueSource;

/// Files the workflow reads and overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriagePaths {
    /// Issue → theme JSON cache
    pub cache_file: PathBuf,
    /// Last-sync timestamp
    pub stamp_file: PathBuf,
    /// Rendered wiki page
    pub wiki_file: PathBuf,
}

impl Default for TriagePaths {
    fn default() -> Self {
        Self {
            cache_file: PathBuf::from(".github/triage_cache.json"),
            stamp_file: PathBuf::from(".github/last_triage.txt"),
            wiki_file: PathBuf::from("wiki/Issue-Categories.md"),
        }
    }
}

impl TriagePaths {
    /// Resolves relative paths against `root`.
    pub fn under(&self, root: &Path) -> Self {
        Self {
            cache_file: root.join(&self.cache_file),
            stamp_file: root.join(&self.stamp_file),
            wiki_file: root.join(&self.wiki_file),
        }
    }
}

/// Per-run settings.
#[derive(Debug, Clone)]
pub struct TriageSettings {
    /// `owner/repo`, used for fallback issue links
    pub repo: String,
    /// Classification themes, in wiki order
    pub themes: ThemeSet,
    /// State and output files
    pub paths: TriagePaths,
    /// Sampling temperature for the classification call
    pub temperature: f32,
    /// Write the rendered page to `paths.wiki_file`
    pub write_wiki: bool,
}

impl TriageSettings {
    /// Settings with default themes, paths and temperature.
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            themes: ThemeSet::default(),
            paths: TriagePaths::default(),
            temperature: triage_core::llm::DEFAULT_TEMPERATURE,
            write_wiki: true,
        }
    }

    /// Replaces the file locations.
    pub fn with_paths(mut self, paths: TriagePaths) -> Self {
        self.paths = paths;
        self
    }

    /// Replaces the theme set.
    pub fn with_themes(mut self, themes: ThemeSet) -> Self {
        self.themes = themes;
        self
    }

    /// Enables or disables writing the wiki file.
    pub fn with_write_wiki(mut self, write: bool) -> Self {
        self.write_wiki = write;
        self
    }
}

/// Summary of a run that rewrote the cache and wiki.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageReport {
    /// Issues sent for classification
    pub submitted: usize,
    /// Issues the model assigned to a known theme
    pub classified: usize,
    /// Cache entries dropped because the issue is no longer open
    pub removed: Vec<IssueNumber>,
    /// Open issues at the end of the run
    pub open: usize,
    /// Rendered wiki page
    pub wiki_markdown: String,
    /// Tokens spent on the classification call
    pub tokens_used: u32,
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageOutcome {
    /// Nothing changed since the last sync; only the stamp was refreshed.
    Unchanged {
        /// Stamp the change query used
        since: SyncStamp,
    },
    /// Cache and wiki were rebuilt.
    Updated(TriageReport),
}

/// The issue triage workflow.
#[derive(Clone)]
pub struct TriageWorkflow {
    llm: Arc<dyn LlmProvider>,
    issues: Arc<dyn IssueSource>,
    settings: TriageSettings,
}

impl TriageWorkflow {
    /// Creates a workflow over the given model and issue source.
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        issues: Arc<dyn IssueSource>,
        settings: TriageSettings,
    ) -> Self {
        Self {
            llm,
            issues,
            settings,
        }
    }

    /// Settings this workflow runs with.
    pub fn settings(&self) -> &TriageSettings {
        &self.settings
    }

    /// Runs one triage pass.
    pub async fn run(&self) -> Result<TriageOutcome> {
        let paths = &self.settings.paths;
        let started = SyncStamp::now();
        let last = SyncStamp::read(&paths.stamp_file)?;

        tracing::info!(repo = %self.settings.repo, since = %last, "Starting triage run");

        let mut changed = self.issues.open_issues(Some(&last.to_iso())).await?;

        if changed.is_empty() {
            let wiki_missing = self.settings.write_wiki && !paths.wiki_file.exists();
            if !paths.cache_file.exists() || wiki_missing {
                tracing::info!("First run or empty wiki, fetching all open issues");
                changed = self.issues.open_issues(None).await?;
            } else {
                tracing::info!(since = %last, "No issues updated since last sync, nothing to classify");
                started.save(&paths.stamp_file)?;
                return Ok(TriageOutcome::Unchanged { since: last });
            }
        }

        let (classified, tokens_used) = self.classify_step(&changed).await?;

        let mut cache = ClassificationCache::load(&paths.cache_file)?;
        let classified_count = classified.len();
        cache.merge(classified);
        cache.save(&paths.cache_file)?;

        let open_issues = self.issues.open_issues(None).await?;
        let (removed, titles) = self.prune_step(&mut cache, open_issues);
        cache.save(&paths.cache_file)?;

        let wiki_markdown = render_wiki(&self.settings.themes, &cache, &titles, &self.settings.repo);
        if self.settings.write_wiki {
            write_file(&paths.wiki_file, &wiki_markdown)?;
            tracing::info!(path = %paths.wiki_file.display(), "Wiki page written");
        }
        // stamp moves only after the page is current
        started.save(&paths.stamp_file)?;

        tracing::info!(
            submitted = changed.len(),
            classified = classified_count,
            removed = removed.len(),
            open = titles.len(),
            "Triage run completed"
        );

        Ok(TriageOutcome::Updated(TriageReport {
            submitted: changed.len(),
            classified: classified_count,
            removed,
            open: titles.len(),
            wiki_markdown,
            tokens_used,
        }))
    }

    /// Asks the model to classify `issues`.
    async fn classify_step(&self, issues: &[Issue]) -> Result<(BTreeMap<IssueNumber, String>, u32)> {
        if issues.is_empty() {
            tracing::info!("No open issues to classify");
            return Ok((BTreeMap::new(), 0));
        }

        tracing::info!(issues = issues.len(), "Classifying issues");

        let prompt = build_prompt(&self.settings.themes, issues);
        let request = CompletionRequest::new(vec![Message::user(prompt)])
            .with_temperature(self.settings.temperature);

        let response = self.llm.complete(request).await?;
        let classified = parse_classification(&response.content, &self.settings.themes);

        let submitted: BTreeSet<IssueNumber> = issues.iter().map(|i| i.number).collect();
        let unknown = classified.keys().filter(|n| !submitted.contains(n)).count();
        if unknown > 0 {
            tracing::warn!(unknown, "Model classified issues that were not submitted");
        }
        if classified.len() < issues.len() {
            tracing::warn!(
                submitted = issues.len(),
                classified = classified.len(),
                "Some issues were left unclassified"
            );
        }

        tracing::info!(
            classified = classified.len(),
            tokens = response.tokens_used.total(),
            "Classification parsed"
        );

        Ok((classified, response.tokens_used.total()))
    }

    /// Drops stale cache entries; returns them with the title map of open issues.
    fn prune_step(
        &self,
        cache: &mut ClassificationCache,
        open_issues: Vec<Issue>,
    ) -> (Vec<IssueNumber>, BTreeMap<IssueNumber, Issue>) {
        let titles: BTreeMap<IssueNumber, Issue> =
            open_issues.into_iter().map(|i| (i.number, i)).collect();
        let open: BTreeSet<IssueNumber> = titles.keys().copied().collect();

        let removed = cache.retain_open(&open);
        if !removed.is_empty() {
            tracing::info!(removed = removed.len(), "Dropped closed issues from cache");
        }
        (removed, titles)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io_with_path(e, path))
}
