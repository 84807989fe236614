#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Triage Workflows Library
//!
//! The end-to-end issue triage run.

pub mod triage;

pub use triage::{TriageOutcome, TriagePaths, TriageReport, TriageSettings, TriageWorkflow};

// Re-export core types
pub use triage_core::{Error, Result};
