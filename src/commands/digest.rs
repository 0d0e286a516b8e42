use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::common::build_summarizer;
use crate::shared::config::Config;
use crate::summarizer::render::digest_text;
use crate::summarizer::{Activity, Comment, SummarizerOptions};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DigestFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct DigestArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = DigestFormat::Text)]
    pub format: DigestFormat,

    /// Only include activity since this date (e.g. "2024-01-15", "3 days ago")
    #[arg(long)]
    pub since: Option<String>,

    /// Summarize this user instead of the authenticated one
    #[arg(long)]
    pub author: Option<String>,
}

#[derive(Serialize)]
struct DigestReport<'a> {
    author: &'a str,
    since: DateTime<Utc>,
    /// Retrievals that failed and were left out.
    failed: Vec<String>,
    comments: &'a [Comment],
}

/// Collect activity once and print it to stdout.
#[tokio::main]
pub async fn run(args: &DigestArgs) -> Result<()> {
    let config = Config::load()?;
    let summarizer = build_summarizer(&config, args.options(&config)).await?;
    let activity = summarizer.collect_activity().await;

    let output = args.render(&activity, summarizer.author(), summarizer.since())?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

impl DigestArgs {
    fn options(&self, config: &Config) -> SummarizerOptions {
        let mut options = SummarizerOptions::from(config);
        if self.since.is_some() {
            options.since.clone_from(&self.since);
        }
        if self.author.is_some() {
            options.author.clone_from(&self.author);
        }
        options
    }

    fn render(&self, activity: &Activity, author: &str, since: DateTime<Utc>) -> Result<String> {
        match self.format {
            DigestFormat::Text => Ok(digest_text(&activity.comments)),
            DigestFormat::Json => {
                let report = DigestReport {
                    author,
                    since,
                    failed: activity
                        .failures
                        .iter()
                        .map(|failure| format!("{}: {:#}", failure.branch, failure.error))
                        .collect(),
                    comments: &activity.comments,
                };
                Ok(serde_json::to_string_pretty(&report)?)
            }
        }
    }
}
