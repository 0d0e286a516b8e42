//! wiremock-based GitHub mock server for testing.
//!
//! Provides `GitHubMockServer` for HTTP-level mocking of the GitHub API calls
//! made while collecting activity.
//!
//! # Usage
//!
//! ```ignore
//! let mock = GitHubMockServer::start().await;
//!
//! // Search (server-level)
//! mock.search("involves:alice")
//!     .page(1)
//!     .items(&[MockSearchItem::issue("org", "repo", 42)])
//!     .next_page(2)
//!     .mount()
//!     .await;
//!
//! // Comments (repo-scoped)
//! let ctx = mock.repo("org", "repo");
//! ctx.issue_comments(42, 1, &[("alice", "2024-01-05T00:00:00Z")], None).await;
//! ctx.review_comments(42, 1, &[("alice", "2023-12-01T00:00:00Z")], None).await;
//!
//! // User operations
//! mock.current_user("alice").await;
//! ```

use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::client::OctocrabClient;

/// Create a mock user JSON object for octocrab Author model.
fn mock_user(login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "id": 1,
        "node_id": "U_test",
        "avatar_url": "https://avatars.githubusercontent.com/u/1",
        "gravatar_id": "",
        "url": format!("https://api.github.com/users/{}", login),
        "html_url": format!("https://github.com/{}", login),
        "followers_url": format!("https://api.github.com/users/{}/followers", login),
        "following_url": format!("https://api.github.com/users/{}/following{{/other_user}}", login),
        "gists_url": format!("https://api.github.com/users/{}/gists{{/gist_id}}", login),
        "starred_url": format!("https://api.github.com/users/{}/starred{{/owner}}{{/repo}}", login),
        "subscriptions_url": format!("https://api.github.com/users/{}/subscriptions", login),
        "organizations_url": format!("https://api.github.com/users/{}/orgs", login),
        "repos_url": format!("https://api.github.com/users/{}/repos", login),
        "events_url": format!("https://api.github.com/users/{}/events{{/privacy}}", login),
        "received_events_url": format!("https://api.github.com/users/{}/received_events", login),
        "type": "User",
        "site_admin": false
    })
}

/// Create a mock issue comment JSON object for octocrab issues::Comment model.
fn mock_comment(
    owner: &str,
    repo: &str,
    issue_number: u64,
    comment_id: u64,
    author: &str,
    created_at: &str,
) -> serde_json::Value {
    json!({
        "id": comment_id,
        "node_id": format!("IC_{comment_id}"),
        "url": format!("https://api.github.com/repos/{}/{}/issues/comments/{}", owner, repo, comment_id),
        "html_url": format!("https://github.com/{}/{}/issues/{}#issuecomment-{}", owner, repo, issue_number, comment_id),
        "issue_url": format!("https://api.github.com/repos/{}/{}/issues/{}", owner, repo, issue_number),
        "body": format!("comment {comment_id}"),
        "author_association": "OWNER",
        "user": mock_user(author),
        "created_at": created_at,
        "updated_at": created_at
    })
}

/// Create a mock review comment JSON object for octocrab pulls::Comment model.
fn mock_review_comment(
    owner: &str,
    repo: &str,
    pr_number: u64,
    comment_id: u64,
    author: &str,
    created_at: &str,
) -> serde_json::Value {
    let api_url = format!("https://api.github.com/repos/{owner}/{repo}/pulls/comments/{comment_id}");
    let html_url = format!("https://github.com/{owner}/{repo}/pull/{pr_number}#discussion_r{comment_id}");
    let pr_url = format!("https://api.github.com/repos/{owner}/{repo}/pulls/{pr_number}");
    json!({
        "url": api_url,
        "pull_request_review_id": 1,
        "id": comment_id,
        "node_id": format!("PRRC_{comment_id}"),
        "diff_hunk": "@@ -1,3 +1,4 @@",
        "path": "src/main.rs",
        "position": 1,
        "original_position": 1,
        "commit_id": "abc123",
        "original_commit_id": "abc123",
        "user": mock_user(author),
        "body": format!("review comment {comment_id}"),
        "created_at": created_at,
        "updated_at": created_at,
        "html_url": html_url,
        "pull_request_url": pr_url,
        "author_association": "OWNER",
        "_links": {
            "self": {"href": api_url},
            "html": {"href": html_url},
            "pull_request": {"href": pr_url}
        },
        "start_line": 1,
        "original_start_line": 1,
        "start_side": "RIGHT",
        "line": 2,
        "original_line": 2,
        "side": "RIGHT"
    })
}

/// Search result item definition for test setup.
#[derive(Clone)]
pub struct MockSearchItem<'a> {
    owner: &'a str,
    repo: &'a str,
    number: u64,
    title: &'a str,
    body: Option<&'a str>,
    open: bool,
    pull_request: bool,
    created_at: &'a str,
}

impl<'a> MockSearchItem<'a> {
    /// A plain issue (no pull request links).
    pub fn issue(owner: &'a str, repo: &'a str, number: u64) -> Self {
        Self {
            owner,
            repo,
            number,
            title: "Test Issue",
            body: Some("Test body"),
            open: true,
            pull_request: false,
            created_at: "2024-01-02T00:00:00Z",
        }
    }

    /// A pull request (carries pull request links).
    pub fn pull_request(owner: &'a str, repo: &'a str, number: u64) -> Self {
        Self {
            pull_request: true,
            title: "Test PR",
            ..Self::issue(owner, repo, number)
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn body(mut self, body: Option<&'a str>) -> Self {
        self.body = body;
        self
    }

    pub fn closed(mut self) -> Self {
        self.open = false;
        self
    }

    pub fn created_at(mut self, created_at: &'a str) -> Self {
        self.created_at = created_at;
        self
    }

    fn to_json(&self) -> serde_json::Value {
        let (owner, repo, number) = (self.owner, self.repo, self.number);
        let kind = if self.pull_request { "pull" } else { "issues" };
        let mut item = json!({
            "id": number,
            "node_id": format!("I_{number}"),
            "url": format!("https://api.github.com/repos/{owner}/{repo}/issues/{number}"),
            "repository_url": format!("https://api.github.com/repos/{owner}/{repo}"),
            "labels_url": format!("https://api.github.com/repos/{owner}/{repo}/issues/{number}/labels{{/name}}"),
            "comments_url": format!("https://api.github.com/repos/{owner}/{repo}/issues/{number}/comments"),
            "events_url": format!("https://api.github.com/repos/{owner}/{repo}/issues/{number}/events"),
            "html_url": format!("https://github.com/{owner}/{repo}/{kind}/{number}"),
            "number": number,
            "state": if self.open { "open" } else { "closed" },
            "title": self.title,
            "body": self.body,
            "user": mock_user("testuser"),
            "labels": [],
            "assignees": [],
            "author_association": "OWNER",
            "milestone": null,
            "locked": false,
            "comments": 0,
            "closed_at": null,
            "created_at": self.created_at,
            "updated_at": self.created_at,
            "score": 1.0
        });
        if self.pull_request {
            item["pull_request"] = json!({
                "url": format!("https://api.github.com/repos/{owner}/{repo}/pulls/{number}"),
                "html_url": format!("https://github.com/{owner}/{repo}/pull/{number}"),
                "diff_url": format!("https://github.com/{owner}/{repo}/pull/{number}.diff"),
                "patch_url": format!("https://github.com/{owner}/{repo}/pull/{number}.patch")
            });
        }
        item
    }
}

/// wiremock-based GitHub mock server for testing.
///
/// This provides HTTP-level mocking for GitHub API endpoints, allowing tests
/// to verify actual HTTP requests rather than mocking at the trait level.
pub struct GitHubMockServer {
    server: MockServer,
}

impl GitHubMockServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get an OctocrabClient configured to use this mock server.
    pub fn client(&self) -> OctocrabClient {
        OctocrabClient::with_base_url(&self.server.uri(), "test-token").unwrap()
    }

    /// Create a repository context for building comment mocks.
    pub fn repo<'a>(&'a self, owner: &'a str, repo: &'a str) -> MockRepoContext<'a> {
        MockRepoContext {
            server: &self.server,
            owner,
            repo,
        }
    }

    /// Build a mock for GET /search/issues whose `q` contains `query_fragment`.
    pub fn search<'a>(&'a self, query_fragment: &'a str) -> MockSearchBuilder<'a> {
        MockSearchBuilder {
            server: &self.server,
            query_fragment,
            page: 1,
            items: Vec::new(),
            next_page: None,
        }
    }

    /// Shorthand for a search page matching any query.
    pub async fn search_issues(
        &self,
        page: u32,
        items: &[MockSearchItem<'_>],
        next_page: Option<u32>,
    ) {
        let mut builder = self.search("").page(page).items(items);
        if let Some(next) = next_page {
            builder = builder.next_page(next);
        }
        builder.mount().await;
    }

    /// Mock GET /search/issues failing with `status`.
    pub async fn search_issues_fails(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": "Validation Failed",
                "documentation_url": "https://docs.github.com/rest/search/search#search-issues-and-pull-requests"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock GET /user for current user.
    pub async fn current_user(&self, login: &str) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_user(login)))
            .mount(&self.server)
            .await;
    }
}

/// Builder for one page of search results.
pub struct MockSearchBuilder<'a> {
    server: &'a MockServer,
    query_fragment: &'a str,
    page: u32,
    items: Vec<serde_json::Value>,
    next_page: Option<u32>,
}

impl<'a> MockSearchBuilder<'a> {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn items(mut self, items: &[MockSearchItem<'_>]) -> Self {
        self.items = items.iter().map(MockSearchItem::to_json).collect();
        self
    }

    /// Emit `count` issues numbered from `first`.
    pub fn generated_issues(mut self, owner: &str, repo: &str, first: u64, count: u64) -> Self {
        self.items = (first..first + count)
            .map(|number| MockSearchItem::issue(owner, repo, number).to_json())
            .collect();
        self
    }

    pub fn next_page(mut self, next_page: u32) -> Self {
        self.next_page = Some(next_page);
        self
    }

    pub async fn mount(self) {
        let body = json!({
            "total_count": self.items.len(),
            "incomplete_results": false,
            "items": self.items
        });
        let link = self.next_page.map(|next| {
            format!(
                "<{}/search/issues?per_page=100&page={next}>; rel=\"next\"",
                self.server.uri()
            )
        });
        let response = with_link(ResponseTemplate::new(200).set_body_json(body), link);

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param_contains("q", self.query_fragment))
            .and(query_param("page", self.page.to_string()))
            .respond_with(response)
            .mount(self.server)
            .await;
    }
}

fn with_link(response: ResponseTemplate, link: Option<String>) -> ResponseTemplate {
    match link {
        Some(link) => response.insert_header("link", link.as_str()),
        None => response,
    }
}

/// Repository context for building mocks.
pub struct MockRepoContext<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
}

impl<'a> MockRepoContext<'a> {
    /// Mock one page of GET /repos/{owner}/{repo}/issues/{number}/comments.
    ///
    /// `comments` are `(author, created_at)` pairs.
    pub async fn issue_comments(
        &self,
        number: u64,
        page: u32,
        comments: &[(&str, &str)],
        next_page: Option<u32>,
    ) {
        let api_path = format!("/repos/{}/{}/issues/{}/comments", self.owner, self.repo, number);
        let body: Vec<_> = comments
            .iter()
            .enumerate()
            .map(|(i, (author, created_at))| {
                let id = number * 1000 + u64::from(page) * 100 + i as u64;
                mock_comment(self.owner, self.repo, number, id, author, created_at)
            })
            .collect();
        self.mount_page(&api_path, page, json!(body), next_page).await;
    }

    /// Mock one page of GET /repos/{owner}/{repo}/pulls/{number}/comments.
    pub async fn review_comments(
        &self,
        number: u64,
        page: u32,
        comments: &[(&str, &str)],
        next_page: Option<u32>,
    ) {
        let api_path = format!("/repos/{}/{}/pulls/{}/comments", self.owner, self.repo, number);
        let body: Vec<_> = comments
            .iter()
            .enumerate()
            .map(|(i, (author, created_at))| {
                let id = number * 1000 + u64::from(page) * 100 + i as u64;
                mock_review_comment(self.owner, self.repo, number, id, author, created_at)
            })
            .collect();
        self.mount_page(&api_path, page, json!(body), next_page).await;
    }

    /// Mock every issue comment listing in this repository as a single empty page.
    ///
    /// Mount this after specific `issue_comments` mocks; wiremock matches the
    /// first mounted mock.
    pub async fn no_other_issue_comments(&self) {
        Mock::given(method("GET"))
            .and(path_regex(format!(
                r"^/repos/{}/{}/issues/\d+/comments$",
                self.owner, self.repo
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(self.server)
            .await;
    }

    /// Mock issue comments for `number` failing with HTTP 500.
    pub async fn issue_comments_fail(&self, number: u64) {
        Mock::given(method("GET"))
            .and(path(format!(
                "/repos/{}/{}/issues/{}/comments",
                self.owner, self.repo, number
            )))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "message": "Server Error",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(self.server)
            .await;
    }

    async fn mount_page(
        &self,
        api_path: &str,
        page: u32,
        body: serde_json::Value,
        next_page: Option<u32>,
    ) {
        let link = next_page.map(|next| {
            format!(
                "<{}{api_path}?per_page=100&page={next}>; rel=\"next\"",
                self.server.uri()
            )
        });
        Mock::given(method("GET"))
            .and(path(api_path))
            .and(query_param("page", page.to_string()))
            .respond_with(with_link(ResponseTemplate::new(200).set_body_json(body), link))
            .mount(self.server)
            .await;
    }
}
