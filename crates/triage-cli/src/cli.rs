//! Command-line arguments.

use clap::{Parser, Subcommand};

/// Classify open GitHub issues into themes and publish a wiki page.
#[derive(Parser, Debug)]
#[command(name = "triage", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify issues changed since the last run and rebuild the wiki page
    Run {
        /// Print the wiki page to stdout instead of writing the wiki file
        #[arg(long)]
        stdout: bool,
    },
    /// Inspect or edit the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key (e.g. `llm.model`)
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value; booleans and numbers are detected
        value: String,
    },
    /// Write a default config file
    Init {
        /// Target file instead of the default location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for `docker run`
        #[arg(long)]
        docker_env: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_stdout() {
        let cli = Cli::try_parse_from(["triage", "run", "--stdout"]).unwrap();
        assert!(matches!(cli.command, Command::Run { stdout: true }));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["triage", "run", "-v", "--config", "t.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("t.toml"));
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from(["triage", "config", "set", "llm.model", "gpt-4o"]).unwrap();
        let Command::Config { action } = cli.command else {
            unreachable!("expected config command");
        };
        assert_eq!(
            action,
            ConfigAction::Set {
                key: "llm.model".to_string(),
                value: "gpt-4o".to_string()
            }
        );
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["triage"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
