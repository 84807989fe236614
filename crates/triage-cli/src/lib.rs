//! # triage-cli
//!
//! Library side of the `triage` binary: argument definitions, the TOML
//! configuration with its `config` subcommands, and the `run` command that
//! wires GitHub and the chat-completions API into the triage workflow.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;

pub use commands::{Credentials, build_workflow, cmd_run};
pub use config::{ConfigManager, TriageConfig};
