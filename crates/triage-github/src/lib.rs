//! GitHub issues source for the triage pipeline.
//!
//! [`IssueSource`] is the seam the workflow depends on. [`GitHubClient`]
//! implements it against the REST issues endpoint; [`StaticIssueSource`]
//! serves a fixed list for tests and offline runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod source;

pub use client::{GITHUB_API_BASE, GitHubClient, RepoSlug};
pub use source::{IssueSource, StaticIssueSource};
