//! Centralized reader for GITHUB_GAS_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const REPOSITORIES: &str = "GITHUB_GAS_REPOSITORIES";
const QUERY_EXTRA: &str = "GITHUB_GAS_QUERY_EXTRA";
const FROM_DATE: &str = "GITHUB_GAS_FROM_DATE";
const AUTHOR: &str = "GITHUB_GAS_AUTHOR";
const AUTH: &str = "GITHUB_GAS_AUTH";
const SEARCH_QUERY: &str = "GITHUB_GAS_SEARCH_QUERY";
const TOKEN_COMMAND: &str = "GITHUB_GAS_TOKEN_COMMAND";
const API_URL: &str = "GITHUB_GAS_API_URL";
const LOG: &str = "GITHUB_GAS_LOG";
const LOG_FORMAT: &str = "GITHUB_GAS_LOG_FORMAT";

/// Snapshot of all GITHUB_GAS_* environment variables at load time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnvVars {
    /// Comma-separated `owner/name` list restricting the search.
    pub repositories: Option<String>,

    /// Free-text fragment appended to both search queries.
    pub query_extra: Option<String>,

    /// "Since" date expression, e.g. "2024-01-01" or "2 weeks ago".
    pub from_date: Option<String>,

    /// Explicit author; the authenticated user is used when unset.
    pub author: Option<String>,

    /// Credential source: "keyring", "file", "cli" or unset for all of them.
    pub auth: Option<String>,

    /// Raw participation query replacing the generated one.
    pub search_query: Option<String>,

    /// Command printing a token on stdout (default: `gh auth token`).
    pub token_command: Option<String>,

    /// GitHub API base URL for GitHub Enterprise.
    pub api_url: Option<String>,

    /// Log filter directive (default: info).
    pub log: Option<String>,

    /// Log output format: "json" or unset for human-readable lines.
    pub log_format: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all GITHUB_GAS_* environment variables from the current process.
    pub fn load() -> Self {
        Self {
            repositories: non_empty_var(REPOSITORIES),
            query_extra: non_empty_var(QUERY_EXTRA),
            from_date: non_empty_var(FROM_DATE),
            author: non_empty_var(AUTHOR),
            auth: non_empty_var(AUTH),
            search_query: non_empty_var(SEARCH_QUERY),
            token_command: non_empty_var(TOKEN_COMMAND),
            api_url: non_empty_var(API_URL),
            log: non_empty_var(LOG),
            log_format: non_empty_var(LOG_FORMAT),
        }
    }
}
