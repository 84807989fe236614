//! Triage CLI
//!
//! Classifies open GitHub issues into themes with an LLM and publishes the
//! result as a wiki page.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use triage_cli::cli::{Cli, Command};
use triage_cli::config_handlers::handle_config_command;
use triage_cli::{ConfigManager, Credentials, TriageConfig, cmd_run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "debug"
    } else {
        "info,triage=debug"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("triage failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Run { stdout } => {
            let config = TriageConfig::load(config_path).context("loading configuration")?;
            cmd_run(&config, Credentials::from_env(), stdout).await?;
        }
        Command::Config { action } => handle_config_command(config_path, action)?,
    }
    Ok(())
}
