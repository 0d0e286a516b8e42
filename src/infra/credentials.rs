//! GitHub token lookup.
//!
//! Sources are probed in a fixed order (keyring, token file, CLI command)
//! and the first non-empty token wins. A failing source yields an empty
//! string; only the caller decides whether "no token at all" is fatal.

use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::Deserialize;
use thiserror::Error;

use crate::shared::dirs;

const KEYRING_SERVICE: &str = "github-activity-summarizer";
const KEYRING_ACCOUNT: &str = "github-activity-summarizer";
const TOKEN_FILE_NAME: &str = "token";

/// Which credential source(s) to consult.
#[derive(Debug, Default, Clone, Copy, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    /// System secret store.
    Keyring,
    /// Token file under the config directory.
    File,
    /// External token command (`gh auth token` by default).
    Cli,
    /// Keyring, then file, then CLI.
    #[default]
    All,
}

impl FromStr for CredentialSource {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyring" => Ok(Self::Keyring),
            "file" => Ok(Self::File),
            "cli" => Ok(Self::Cli),
            "all" | "" => Ok(Self::All),
            other => Err(CredentialError::UnknownSource(other.to_string())),
        }
    }
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Keyring => "keyring",
            Self::File => "file",
            Self::Cli => "cli",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Unknown credential source: {0} (expected keyring, file or cli)")]
    UnknownSource(String),

    #[error(
        "No GitHub token found (source: {0}). Store one in the keyring, in ~/.config/github-gas-server/token, or make sure `gh auth token` works"
    )]
    NoToken(CredentialSource),
}

type Probe = fn(&CredentialResolver) -> String;

/// Probe order used when every source is allowed.
static PROBES: [(&str, Probe); 3] = [
    ("keyring", CredentialResolver::from_keyring),
    ("file", CredentialResolver::from_file),
    ("cli", CredentialResolver::from_command),
];

/// Resolves a GitHub token from the configured sources.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    keyring_service: String,
    keyring_account: String,
    token_file: Option<PathBuf>,
    token_command: Vec<String>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self {
            keyring_service: KEYRING_SERVICE.to_string(),
            keyring_account: KEYRING_ACCOUNT.to_string(),
            token_file: dirs::app_config_dir().map(|dir| dir.join(TOKEN_FILE_NAME)),
            token_command: default_token_command(),
        }
    }
}

fn default_token_command() -> Vec<String> {
    vec!["gh".to_string(), "auth".to_string(), "token".to_string()]
}

impl CredentialResolver {
    /// Replace the CLI probe's command (program followed by arguments).
    pub fn with_token_command(mut self, command: Vec<String>) -> Self {
        self.token_command = command;
        self
    }

    #[cfg(test)]
    fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }

    #[cfg(test)]
    fn with_keyring_entry(mut self, service: &str, account: &str) -> Self {
        self.keyring_service = service.to_string();
        self.keyring_account = account.to_string();
        self
    }

    /// Return the first non-empty token from `source`, or an empty string.
    pub fn resolve(&self, source: CredentialSource) -> String {
        let probes: &[(&str, Probe)] = match source {
            CredentialSource::Keyring => &PROBES[..1],
            CredentialSource::File => &PROBES[1..2],
            CredentialSource::Cli => &PROBES[2..],
            CredentialSource::All => &PROBES,
        };

        probes
            .iter()
            .find_map(|(name, probe)| {
                let token = probe(self);
                if token.is_empty() {
                    tracing::debug!(source = name, "no token from credential source");
                    None
                } else {
                    tracing::info!(source = name, "using GitHub token");
                    Some(token)
                }
            })
            .unwrap_or_default()
    }

    /// Like `resolve`, but an empty result is an error.
    pub fn require(&self, source: CredentialSource) -> Result<String, CredentialError> {
        let token = self.resolve(source);
        if token.is_empty() {
            return Err(CredentialError::NoToken(source));
        }
        Ok(token)
    }

    fn from_keyring(&self) -> String {
        let entry = match keyring::Entry::new(&self.keyring_service, &self.keyring_account) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "keyring unavailable");
                return String::new();
            }
        };
        match entry.get_password() {
            Ok(token) => token.trim().to_string(),
            Err(e) => {
                tracing::debug!(error = %e, "keyring lookup failed");
                String::new()
            }
        }
    }

    fn from_file(&self) -> String {
        let Some(path) = &self.token_file else {
            return String::new();
        };
        std::fs::read_to_string(path)
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }

    fn from_command(&self) -> String {
        let Some((program, args)) = self.token_command.split_first() else {
            return String::new();
        };
        match Command::new(program).args(args).output() {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            Ok(output) => {
                tracing::debug!(
                    status = %output.status,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "token command failed"
                );
                String::new()
            }
            Err(e) => {
                tracing::debug!(program = %program, error = %e, "failed to run token command");
                String::new()
            }
        }
    }
}
