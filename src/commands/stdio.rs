use anyhow::Result;

use super::common::build_summarizer;
use crate::mcp::{ActivityPrompt, McpServer};
use crate::shared::config::Config;
use crate::summarizer::SummarizerOptions;

/// Serve the `gas` prompt over stdin/stdout until stdin closes.
#[tokio::main]
pub async fn run() -> Result<()> {
    let config = Config::load()?;
    let summarizer = build_summarizer(&config, SummarizerOptions::from(&config)).await?;
    let server = McpServer::new(ActivityPrompt::new(summarizer));
    server.serve_stdio().await?;
    Ok(())
}
