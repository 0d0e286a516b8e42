use anyhow::{Context, Result};

use crate::infra::credentials::CredentialResolver;
use crate::infra::github::OctocrabClient;
use crate::shared::config::Config;
use crate::summarizer::{Summarizer, SummarizerOptions};

/// Resolve a token, connect to GitHub and build the summarizer.
///
/// A missing token, an invalid "since" expression or a failed
/// authenticated-user lookup all end here as errors.
pub async fn build_summarizer(
    config: &Config,
    options: SummarizerOptions,
) -> Result<Summarizer<OctocrabClient>> {
    let mut resolver = CredentialResolver::default();
    if let Some(command) = config.token_command_args()? {
        resolver = resolver.with_token_command(command);
    }
    let token = resolver.require(config.auth)?;

    let client = OctocrabClient::connect(config.api_url.as_deref(), &token)
        .context("Failed to create GitHub client")?;
    Summarizer::new(client, options).await
}
