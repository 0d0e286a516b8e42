//! Search and comment listing used to collect a user's activity.

use chrono::{DateTime, Utc};
use octocrab::models::IssueState;

use super::client::OctocrabClient;
use super::error::{GitHubError, Result};

/// Items requested per page for every listing call.
pub const PER_PAGE: u8 = 100;

/// One page of results plus the number of the page after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` (or 0) when this was the last page.
    pub next_page: Option<u32>,
}

/// Sort key for issue search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSort {
    Updated,
    Created,
}

impl SearchSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Created => "created",
        }
    }
}

/// An issue or pull request matched by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchItem {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    /// API URL of the repository, e.g. `https://api.github.com/repos/owner/name`.
    pub repository_url: String,
    pub html_url: String,
    pub is_open: bool,
    /// Set when the item carries pull request links.
    pub is_pull_request: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An issue comment or pull request review comment.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadComment {
    pub author: Option<String>,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trait for the GitHub calls needed to summarize activity.
#[async_trait::async_trait]
pub trait ActivityClient: Send + Sync {
    /// Login of the authenticated user.
    async fn current_user_login(&self) -> Result<String>;

    /// One page of issue/PR search results, newest first by `sort`.
    async fn search_issues(
        &self,
        query: &str,
        sort: SearchSort,
        page: u32,
    ) -> Result<Page<SearchItem>>;

    /// One page of comments on an issue or pull request conversation.
    async fn list_issue_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        page: u32,
    ) -> Result<Page<ThreadComment>>;

    /// One page of review (diff) comments on a pull request.
    async fn list_review_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        page: u32,
    ) -> Result<Page<ThreadComment>>;
}

#[async_trait::async_trait]
impl ActivityClient for OctocrabClient {
    async fn current_user_login(&self) -> Result<String> {
        let user = self
            .client
            .current()
            .user()
            .await
            .map_err(GitHubError::from)?;
        Ok(user.login)
    }

    async fn search_issues(
        &self,
        query: &str,
        sort: SearchSort,
        page: u32,
    ) -> Result<Page<SearchItem>> {
        let result = self
            .client
            .search()
            .issues_and_pull_requests(query)
            .sort(sort.as_str())
            .order("desc")
            .per_page(PER_PAGE)
            .page(page)
            .send()
            .await
            .map_err(GitHubError::from)?;

        let next_page = next_page_number(result.next.as_ref().and_then(|uri| uri.query()), page);
        let items = result
            .items
            .into_iter()
            .map(|issue| SearchItem {
                number: issue.number,
                title: issue.title,
                body: issue.body,
                repository_url: issue.repository_url.to_string(),
                html_url: issue.html_url.to_string(),
                is_open: issue.state == IssueState::Open,
                is_pull_request: issue.pull_request.is_some(),
                created_at: issue.created_at,
                updated_at: issue.updated_at,
            })
            .collect();

        Ok(Page { items, next_page })
    }

    async fn list_issue_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        page: u32,
    ) -> Result<Page<ThreadComment>> {
        let result = self
            .client
            .issues(owner, repo)
            .list_comments(number)
            .per_page(PER_PAGE)
            .page(page)
            .send()
            .await
            .map_err(GitHubError::from)?;

        let next_page = next_page_number(result.next.as_ref().and_then(|uri| uri.query()), page);
        let items = result
            .items
            .into_iter()
            .map(|comment| ThreadComment {
                author: Some(comment.user.login),
                html_url: comment.html_url.to_string(),
                created_at: comment.created_at,
                updated_at: comment.updated_at.unwrap_or(comment.created_at),
            })
            .collect();

        Ok(Page { items, next_page })
    }

    async fn list_review_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        page: u32,
    ) -> Result<Page<ThreadComment>> {
        let result = self
            .client
            .pulls(owner, repo)
            .list_comments(Some(number))
            .per_page(PER_PAGE)
            .page(page)
            .send()
            .await
            .map_err(GitHubError::from)?;

        let next_page = next_page_number(result.next.as_ref().and_then(|uri| uri.query()), page);
        let items = result
            .items
            .into_iter()
            .map(|comment| ThreadComment {
                author: comment.user.map(|user| user.login),
                html_url: comment.html_url.to_string(),
                created_at: comment.created_at,
                updated_at: comment.updated_at,
            })
            .collect();

        Ok(Page { items, next_page })
    }
}

/// Page number of the `rel="next"` link.
///
/// `next_query` is the query string of that link, or None when GitHub sent
/// no next link. Falls back to `current + 1` if the link lacks a `page` parameter.
fn next_page_number(next_query: Option<&str>, current: u32) -> Option<u32> {
    let query = next_query?;
    let page = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse().ok());
    Some(page.unwrap_or(current + 1))
}
