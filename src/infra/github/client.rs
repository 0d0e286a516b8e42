//! GitHub API client implementation using octocrab.

use super::error::{GitHubError, Result};

/// Production implementation using octocrab.
pub struct OctocrabClient {
    pub(crate) client: octocrab::Octocrab,
}

impl OctocrabClient {
    /// Create a client for api.github.com authenticated with `token`.
    pub fn new(token: &str) -> Result<Self> {
        let client = octocrab::Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(|e| GitHubError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create a client for a different API root (GitHub Enterprise, test servers).
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self> {
        let client = octocrab::Octocrab::builder()
            .base_uri(base_url)
            .map_err(|e| GitHubError::InvalidBaseUrl(format!("{base_url}: {e}")))?
            .personal_token(token.to_string())
            .build()
            .map_err(|e| GitHubError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }

    /// Build a client from an optional base URL override.
    pub fn connect(api_url: Option<&str>, token: &str) -> Result<Self> {
        match api_url {
            Some(url) => Self::with_base_url(url, token),
            None => Self::new(token),
        }
    }
}
