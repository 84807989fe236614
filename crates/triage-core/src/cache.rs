//! Persistent triage state: the classification cache and the sync stamp.
//!
//! Both live as plain files next to the repository (by default under
//! `.github/`) and are overwritten on every run.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::types::IssueNumber;
use crate::{Error, Result};

/// Stamp value used when no previous sync exists.
pub const EPOCH_STAMP: &str = "1970-01-01T00:00:00Z";

// ============================================================================
// ClassificationCache
// ============================================================================

/// Issue number → theme label map, stored as pretty JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassificationCache {
    entries: BTreeMap<IssueNumber, String>,
}

impl ClassificationCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the cache from `path`.
    ///
    /// A missing file is an empty cache. `null` values, written by older
    /// runs for issues listed outside any heading, are dropped. A file that
    /// is not a JSON object of number → string or null is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No classification cache yet");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let raw: BTreeMap<IssueNumber, Option<String>> = serde_json::from_str(&content)?;
        let total = raw.len();
        let entries: BTreeMap<IssueNumber, String> = raw
            .into_iter()
            .filter_map(|(n, theme)| theme.map(|t| (n, t)))
            .collect();
        if entries.len() < total {
            tracing::debug!(dropped = total - entries.len(), "Ignoring cache entries without a theme");
        }
        let cache = Self { entries };
        tracing::debug!(path = %path.display(), entries = cache.len(), "Loaded classification cache");
        Ok(cache)
    }

    /// Writes the cache to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| Error::io_with_path(e, path))?;
        tracing::debug!(path = %path.display(), entries = self.len(), "Saved classification cache");
        Ok(())
    }

    /// Inserts or overrides the given classifications.
    pub fn merge(&mut self, classified: BTreeMap<IssueNumber, String>) {
        self.entries.extend(classified);
    }

    /// Drops every entry whose issue is not in `open`.
    ///
    /// Returns the removed issue numbers.
    pub fn retain_open(&mut self, open: &BTreeSet<IssueNumber>) -> Vec<IssueNumber> {
        let stale: Vec<IssueNumber> = self
            .entries
            .keys()
            .filter(|n| !open.contains(n))
            .copied()
            .collect();
        for n in &stale {
            self.entries.remove(n);
        }
        stale
    }

    /// Theme label of an issue.
    pub fn get(&self, number: IssueNumber) -> Option<&str> {
        self.entries.get(&number).map(String::as_str)
    }

    /// Iterates entries in ascending issue order.
    pub fn iter(&self) -> impl Iterator<Item = (IssueNumber, &str)> {
        self.entries.iter().map(|(n, t)| (*n, t.as_str()))
    }

    /// Number of cached issues.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SyncStamp
// ============================================================================

/// UTC timestamp of the last triage run, second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SyncStamp(DateTime<Utc>);

impl SyncStamp {
    /// Current time truncated to whole seconds.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Wraps a timestamp, dropping sub-second precision.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        let secs = at.timestamp();
        Self(DateTime::from_timestamp(secs, 0).unwrap_or(at))
    }

    /// The Unix epoch, used when no stamp file exists.
    pub fn epoch() -> Self {
        Self(DateTime::UNIX_EPOCH)
    }

    /// Parses an RFC 3339 timestamp such as `2024-05-01T12:00:00Z`.
    pub fn parse(s: &str) -> Result<Self> {
        let at = DateTime::parse_from_rfc3339(s.trim())
            .map_err(|e| Error::validation_field("stamp", format!("invalid timestamp '{s}': {e}")))?;
        Ok(Self::from_datetime(at.with_timezone(&Utc)))
    }

    /// Reads the stamp file; a missing file yields [`SyncStamp::epoch`].
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::epoch());
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::parse(&content)
    }

    /// Overwrites the stamp file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        std::fs::write(path, self.to_iso()).map_err(|e| Error::io_with_path(e, path))
    }

    /// ISO-8601 form used by the stamp file and GitHub's `since` parameter.
    pub fn to_iso(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Underlying timestamp.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for SyncStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso())
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
        }
    }
    Ok(())
}
