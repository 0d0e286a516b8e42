use chrono::{DateTime, Utc};
use serde::Serialize;

/// One unit of authored activity: an issue comment, a review comment, or
/// an opened pull request.
///
/// `body` is always the body of the parent issue or pull request, never the
/// text of the comment itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub issue_number: u64,
    pub issue_title: String,
    pub repo_name: String,
    pub repo_owner: String,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Link to the comment itself, or to the pull request for opened PRs.
    pub url: String,
    pub is_pull_request: bool,
    pub is_open: bool,
    pub issue_url: String,
}

/// Split a repository API URL into `(owner, name)` using its last two path segments.
pub fn split_repository_url(repository_url: &str) -> (String, String) {
    let mut segments = repository_url.rsplit('/');
    let name = segments.next().unwrap_or_default();
    let owner = segments.next().unwrap_or_default();
    (owner.to_string(), name.to_string())
}
