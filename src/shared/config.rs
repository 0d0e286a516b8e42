use std::path::{Path, PathBuf};
use std::str::FromStr;

use schemars::JsonSchema;
use serde::Deserialize;

use super::dirs;
use super::env_var::EnvVars;
use crate::infra::credentials::CredentialSource;

/// Top-level configuration for github-gas-server.
///
/// Loaded from `config.yaml` and then overridden field by field by the
/// GITHUB_GAS_* environment variables.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Repositories (`owner/name`) the search is restricted to.
    #[serde(default)]
    pub repositories: Vec<String>,

    /// Free-text fragment appended to both search queries.
    pub query_extra: Option<String>,

    /// "Since" date expression (default: 7 days ago).
    pub from_date: Option<String>,

    /// Author whose activity is summarized (default: the authenticated user).
    pub author: Option<String>,

    /// Where the GitHub token comes from (default: all sources in order).
    #[serde(default)]
    pub auth: CredentialSource,

    /// Raw participation search query replacing the generated one.
    pub search_query: Option<String>,

    /// Command printing a GitHub token on stdout (default: "gh auth token").
    pub token_command: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise installations.
    pub api_url: Option<String>,
}

impl Config {
    /// Load the config file and apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let config = load_config()?;
        Ok(config.with_env(&EnvVars::load())?)
    }

    /// Override file values with whatever the environment sets.
    pub fn with_env(mut self, env: &EnvVars) -> Result<Self, ConfigError> {
        if let Some(repos) = &env.repositories {
            self.repositories = parse_repositories(repos);
        }
        if let Some(auth) = &env.auth {
            self.auth = CredentialSource::from_str(auth).map_err(|_| {
                ConfigError::InvalidValue {
                    key: "auth",
                    value: auth.clone(),
                }
            })?;
        }
        override_with(&mut self.query_extra, &env.query_extra);
        override_with(&mut self.from_date, &env.from_date);
        override_with(&mut self.author, &env.author);
        override_with(&mut self.search_query, &env.search_query);
        override_with(&mut self.token_command, &env.token_command);
        override_with(&mut self.api_url, &env.api_url);
        Ok(self)
    }

    /// Split the configured token command into program and arguments.
    /// Returns None when no command is configured.
    pub fn token_command_args(&self) -> Result<Option<Vec<String>>, ConfigError> {
        let Some(command) = &self.token_command else {
            return Ok(None);
        };
        match shlex::split(command) {
            Some(args) if !args.is_empty() => Ok(Some(args)),
            _ => Err(ConfigError::InvalidValue {
                key: "token_command",
                value: command.clone(),
            }),
        }
    }
}

fn override_with(field: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        field.clone_from(value);
    }
}

/// Parse a comma-separated `owner/name` list, dropping blank entries.
pub fn parse_repositories(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|repo| !repo.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Load configuration from ~/.config/github-gas-server/config.ya?ml.
/// Returns Config::default() if no config file exists.
pub fn load_config() -> anyhow::Result<Config> {
    let Some(dir) = dirs::app_config_dir() else {
        return Ok(Config::default());
    };
    load_config_from_dir(&dir)
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
/// Returns Config::default() if neither file exists.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for filename in &["config.yaml", "config.yml"] {
        let path = dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }.into()),
        }
    }

    Ok(Config::default())
}

/// Parse YAML content into Config.
fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    serde_yaml::from_str(content)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
        .map_err(Into::into)
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
