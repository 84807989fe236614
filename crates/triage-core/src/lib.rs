#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Triage Core Library
//!
//! Themes, classification parsing, cache persistence and wiki rendering for
//! the issue triage pipeline.

pub mod cache;
pub mod classify;
pub mod error;
pub mod llm;
pub mod render;
pub mod theme;
pub mod types;

// Re-exports for convenience
pub use cache::{ClassificationCache, SyncStamp};
pub use error::{Error, Result};
pub use theme::ThemeSet;
pub use types::{Issue, IssueNumber};
