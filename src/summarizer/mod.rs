//! Collects a user's recent GitHub participation.
//!
//! Two independent searches feed the digest:
//! - participation: issues and PRs the author was involved in, expanded into
//!   the author's own issue comments (since the cutoff) and review comments;
//! - opened PRs: pull requests the author created since the cutoff.

mod activity;
pub mod comment;
pub mod paginate;
pub mod query;
pub mod render;
pub mod since;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::infra::github::error::Result;
use crate::infra::github::{ActivityClient, SearchItem, SearchSort, ThreadComment};
use crate::shared::config::Config;

pub use activity::Activity;
pub use comment::Comment;
use comment::split_repository_url;
use paginate::PageCursor;
use query::QueryScope;

/// Options for building a [`Summarizer`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummarizerOptions {
    /// Author to summarize; the authenticated user when None.
    pub author: Option<String>,
    /// "Since" date expression; seven days back when None.
    pub since: Option<String>,
    pub repos: Vec<String>,
    pub query_extra: Option<String>,
    /// Raw participation query replacing the generated one.
    pub search_query: Option<String>,
}

impl From<&Config> for SummarizerOptions {
    fn from(config: &Config) -> Self {
        Self {
            author: config.author.clone(),
            since: config.from_date.clone(),
            repos: config.repositories.clone(),
            query_extra: config.query_extra.clone(),
            search_query: config.search_query.clone(),
        }
    }
}

/// Read-only aggregation state, built once and shared by every prompt call.
pub struct Summarizer<C> {
    client: C,
    author: String,
    since: DateTime<Utc>,
    repos: Vec<String>,
    query_extra: Option<String>,
    search_query: Option<String>,
}

impl<C: ActivityClient> Summarizer<C> {
    /// Build a summarizer, resolving "since" relative to the current time.
    pub async fn new(client: C, options: SummarizerOptions) -> Result<Self> {
        Self::new_at(client, options, Utc::now()).await
    }

    /// Build a summarizer, resolving "since" relative to `now`.
    ///
    /// Fails if the since expression is invalid, or if no author is given
    /// and the authenticated user cannot be fetched.
    pub async fn new_at(client: C, options: SummarizerOptions, now: DateTime<Utc>) -> Result<Self> {
        let since = match options.since.as_deref() {
            Some(expr) => since::parse_since(expr, now).context("Invalid from date")?,
            None => since::default_since(now),
        };

        let author = match options.author.filter(|author| !author.is_empty()) {
            Some(author) => author,
            None => client
                .current_user_login()
                .await
                .context("Failed to get authenticated user")?,
        };

        info!(author = %author, since = %since, "summarizer ready");

        Ok(Self {
            client,
            author,
            since,
            repos: options.repos,
            query_extra: options.query_extra,
            search_query: options.search_query,
        })
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }

    fn scope(&self) -> QueryScope<'_> {
        QueryScope {
            repos: &self.repos,
            extra: self.query_extra.as_deref(),
        }
    }

    pub fn participation_query(&self) -> String {
        query::participation_query(
            &self.author,
            self.since,
            self.scope(),
            self.search_query.as_deref(),
        )
    }

    pub fn opened_prs_query(&self) -> String {
        query::opened_prs_query(&self.author, self.since, self.scope())
    }

    /// The author's comments on issues and PRs they participated in.
    ///
    /// Issue comments must be authored by the configured author and created
    /// at or after the cutoff; review comments only need the author to match.
    /// Any failed API call fails the whole retrieval.
    pub async fn recent_participation_comments(&self) -> Result<Vec<Comment>> {
        let query = self.participation_query();
        info!(query = %query, "searching participation");

        let query = query.as_str();
        let mut comments = Vec::new();
        let mut pages = PageCursor::default();
        while let Some(items) = pages
            .advance(move |page| self.client.search_issues(query, SearchSort::Updated, page))
            .await
            .context("Failed to search issues")?
        {
            for item in &items {
                self.collect_thread(item, &mut comments).await?;
            }
        }

        info!(count = comments.len(), "participation comments collected");
        Ok(comments)
    }

    async fn collect_thread(&self, item: &SearchItem, out: &mut Vec<Comment>) -> Result<()> {
        let (owner, name) = split_repository_url(&item.repository_url);
        let (owner, name, number) = (owner.as_str(), name.as_str(), item.number);

        let mut pages = PageCursor::default();
        while let Some(comments) = pages
            .advance(move |page| self.client.list_issue_comments(owner, name, number, page))
            .await
            .with_context(|| format!("Failed to get comments for issue #{number} in {owner}/{name}"))?
        {
            out.extend(
                comments
                    .into_iter()
                    .filter(|comment| self.is_own(comment) && comment.created_at >= self.since)
                    .map(|comment| {
                        self.thread_record(item, owner, name, comment, item.is_pull_request)
                    }),
            );
        }

        if !item.is_pull_request {
            return Ok(());
        }

        let mut pages = PageCursor::default();
        while let Some(comments) = pages
            .advance(move |page| self.client.list_review_comments(owner, name, number, page))
            .await
            .with_context(|| {
                format!("Failed to get review comments for PR #{number} in {owner}/{name}")
            })?
        {
            out.extend(
                comments
                    .into_iter()
                    .filter(|comment| self.is_own(comment))
                    .map(|comment| self.thread_record(item, owner, name, comment, true)),
            );
        }

        Ok(())
    }

    /// Pull requests the author opened since the cutoff.
    pub async fn opened_pull_requests(&self) -> Result<Vec<Comment>> {
        let query = self.opened_prs_query();
        info!(query = %query, "searching opened pull requests");

        let query = query.as_str();
        let mut prs = Vec::new();
        let mut pages = PageCursor::default();
        while let Some(items) = pages
            .advance(move |page| self.client.search_issues(query, SearchSort::Created, page))
            .await
            .context("Failed to search PRs")?
        {
            prs.extend(
                items
                    .into_iter()
                    .filter(|item| item.is_pull_request)
                    .map(|item| self.pull_request_record(item)),
            );
        }

        info!(count = prs.len(), "opened pull requests collected");
        Ok(prs)
    }

    fn is_own(&self, comment: &ThreadComment) -> bool {
        comment.author.as_deref() == Some(self.author.as_str())
    }

    fn thread_record(
        &self,
        item: &SearchItem,
        owner: &str,
        name: &str,
        comment: ThreadComment,
        is_pull_request: bool,
    ) -> Comment {
        Comment {
            issue_number: item.number,
            issue_title: item.title.clone(),
            repo_name: name.to_string(),
            repo_owner: owner.to_string(),
            body: item.body.clone().unwrap_or_default(),
            author: self.author.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            url: comment.html_url,
            is_pull_request,
            is_open: item.is_open,
            issue_url: item.html_url.clone(),
        }
    }

    fn pull_request_record(&self, item: SearchItem) -> Comment {
        let (owner, name) = split_repository_url(&item.repository_url);
        Comment {
            issue_number: item.number,
            issue_title: item.title,
            repo_name: name,
            repo_owner: owner,
            body: item.body.unwrap_or_default(),
            author: self.author.clone(),
            created_at: item.created_at,
            updated_at: item.updated_at,
            url: item.html_url.clone(),
            is_pull_request: true,
            is_open: item.is_open,
            issue_url: item.html_url,
        }
    }
}
