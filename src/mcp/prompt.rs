//! The `gas` prompt: the user's recent GitHub activity as one text message.

use chrono::{DateTime, Utc};

use super::protocol::{GetPromptResult, Prompt, PromptMessage};
use crate::infra::github::ActivityClient;
use crate::summarizer::render::{NO_ACTIVITY, digest_text};
use crate::summarizer::{Activity, Summarizer};

pub const PROMPT_NAME: &str = "gas";
pub const PROMPT_DESCRIPTION: &str = "Retrieves GitHub activity";

/// Prompts served by [`McpServer`](super::McpServer).
#[async_trait::async_trait]
pub trait PromptHandler: Send + Sync {
    fn prompts(&self) -> Vec<Prompt>;

    /// Render prompt `name`, or None if there is no such prompt.
    async fn get_prompt(&self, name: &str) -> Option<GetPromptResult>;
}

/// Serves the `gas` prompt from a [`Summarizer`].
pub struct ActivityPrompt<C> {
    summarizer: Summarizer<C>,
}

impl<C: ActivityClient> ActivityPrompt<C> {
    pub fn new(summarizer: Summarizer<C>) -> Self {
        Self { summarizer }
    }
}

#[async_trait::async_trait]
impl<C: ActivityClient> PromptHandler for ActivityPrompt<C> {
    fn prompts(&self) -> Vec<Prompt> {
        vec![Prompt {
            name: PROMPT_NAME.to_string(),
            description: PROMPT_DESCRIPTION.to_string(),
        }]
    }

    async fn get_prompt(&self, name: &str) -> Option<GetPromptResult> {
        if name != PROMPT_NAME {
            return None;
        }
        let activity = self.summarizer.collect_activity().await;
        Some(activity_prompt(&activity, self.summarizer.since()))
    }
}

/// Build the prompt result for `activity`.
///
/// The message is the digest (or the no-activity sentinel); failed retrievals
/// are only reflected in the description.
pub fn activity_prompt(activity: &Activity, since: DateTime<Utc>) -> GetPromptResult {
    let mut description = if activity.comments.is_empty() {
        NO_ACTIVITY.to_string()
    } else {
        format!("GitHub activity since {}", since.format("%Y-%m-%d"))
    };

    if activity.is_partial() {
        let failed: Vec<String> = activity
            .failed_branches()
            .iter()
            .map(ToString::to_string)
            .collect();
        description.push_str(&format!(" (partial: {} unavailable)", failed.join(", ")));
    }

    GetPromptResult {
        description,
        messages: vec![PromptMessage::user_text(digest_text(&activity.comments))],
    }
}
