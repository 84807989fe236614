//! Configuration for the `triage` binary.
//!
//! Settings live in a TOML file (by default `<config_dir>/triage/config.toml`)
//! and may be overridden from the environment. Secrets are never stored in
//! the file: `GITHUB_TOKEN` and `OPENAI_API_KEY` are read from the
//! environment only.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use triage_core::llm::{DEFAULT_MODEL, OPENAI_API_BASE};
use triage_core::{Error, Result, ThemeSet};
use triage_github::{GITHUB_API_BASE, RepoSlug};
use triage_workflows::TriagePaths;

/// Repository triaged when none is configured.
pub const DEFAULT_REPO: &str = "voideditor/void";

const DEFAULT_LLM_TEMPERATURE: f64 = 0.2;
const DEFAULT_MAX_RETRIES: usize = 3;

/// Environment variables that override file settings, with the dotted key
/// each one replaces.
pub const ENV_OVERRIDES: [(&str, &str); 7] = [
    ("TRIAGE_REPO", "repo"),
    ("TRIAGE_MODEL", "llm.model"),
    ("TRIAGE_LLM_API_BASE", "llm.api_base"),
    ("TRIAGE_GITHUB_API_BASE", "github.api_base"),
    ("TRIAGE_CACHE_FILE", "paths.cache_file"),
    ("TRIAGE_STAMP_FILE", "paths.stamp_file"),
    ("TRIAGE_WIKI_FILE", "paths.wiki_file"),
];

/// A configuration type the `config` subcommands can manage.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Project name, used for the config directory and user messages.
    fn project_name() -> &'static str;

    /// Platform default location of the config file.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// The explicit path if given, otherwise the platform default.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit.map(PathBuf::from).or_else(Self::default_config_path)
    }

    /// Loads the configuration with environment overrides applied.
    fn load(explicit: Option<&str>) -> Result<Self>;

    /// Checks values serde cannot check on its own.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Serializes the configuration as a TOML document.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// The configuration as environment variable assignments.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>>;
}

/// GitHub API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API root
    pub api_base: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API_BASE.to_string(),
        }
    }
}

/// Chat-completions settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API root of an OpenAI-compatible server
    pub api_base: String,
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Retries for transient failures
    pub max_retries: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: OPENAI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_LLM_TEMPERATURE,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Top-level `triage` configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// `owner/repo` to triage
    pub repo: String,
    /// Theme labels in wiki order
    pub themes: ThemeSet,
    /// Cache, stamp and wiki locations
    pub paths: TriagePaths,
    /// GitHub API settings
    pub github: GitHubConfig,
    /// Model settings
    pub llm: LlmConfig,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.to_string(),
            themes: ThemeSet::default(),
            paths: TriagePaths::default(),
            github: GitHubConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl TriageConfig {
    /// Loads the configuration, reading overrides through `lookup`.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file given explicitly is an error.
    pub fn load_with<F>(explicit: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                let config: Self = toml::from_str(&content).map_err(|e| {
                    Error::config(format!("Failed to parse {}: {e}", path.display()))
                })?;
                tracing::debug!(path = %path.display(), "Loaded configuration file");
                config
            }
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            _ => Self::default(),
        };

        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Replaces settings with non-blank values from the environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, key) in ENV_OVERRIDES {
            let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            tracing::debug!(var, key, "Applying environment override");
            let value = value.trim().to_string();
            match key {
                "repo" => self.repo = value,
                "llm.model" => self.llm.model = value,
                "llm.api_base" => self.llm.api_base = value,
                "github.api_base" => self.github.api_base = value,
                "paths.cache_file" => self.paths.cache_file = value.into(),
                "paths.stamp_file" => self.paths.stamp_file = value.into(),
                "paths.wiki_file" => self.paths.wiki_file = value.into(),
                _ => {}
            }
        }
    }

    /// The configured repository as a validated slug.
    pub fn repo_slug(&self) -> Result<RepoSlug> {
        self.repo.parse()
    }
}

impl ConfigManager for TriageConfig {
    fn project_name() -> &'static str {
        "triage"
    }

    fn load(explicit: Option<&str>) -> Result<Self> {
        Self::load_with(explicit, |var| std::env::var(var).ok())
    }

    fn validate(&self) -> Result<()> {
        self.repo_slug()?;
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(Error::validation_field(
                "llm.temperature",
                format!("must be between 0 and 2, got {}", self.llm.temperature),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(Error::validation_field("llm.model", "must not be empty"));
        }
        Ok(())
    }

    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let path_str = |p: &PathBuf| p.display().to_string();
        let values = [
            self.repo.clone(),
            self.llm.model.clone(),
            self.llm.api_base.clone(),
            self.github.api_base.clone(),
            path_str(&self.paths.cache_file),
            path_str(&self.paths.stamp_file),
            path_str(&self.paths.wiki_file),
        ];
        Ok(ENV_OVERRIDES
            .iter()
            .zip(values)
            .map(|((var, _), value)| (var.to_string(), value))
            .collect())
    }
}
