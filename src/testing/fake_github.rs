//! In-memory `ActivityClient` for summarizer tests.
//!
//! Searches are matched by a query fragment; comment listings by
//! `owner/repo#number`. Unconfigured listings return a single empty page.
//! Every call is recorded so tests can assert on what was requested.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::anyhow;

use crate::infra::github::error::Result;
use crate::infra::github::{ActivityClient, Page, SearchItem, SearchSort, ThreadComment};

type ThreadKey = (String, String, u64);

#[derive(Default)]
pub struct FakeGitHub {
    login: Option<String>,
    searches: Vec<(String, Vec<Vec<SearchItem>>)>,
    failing_searches: Vec<String>,
    issue_comments: HashMap<ThreadKey, Vec<Vec<ThreadComment>>>,
    review_comments: HashMap<ThreadKey, Vec<Vec<ThreadComment>>>,
    failing_issue_comments: HashSet<u64>,
    failing_review_comments: HashSet<u64>,
    calls: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login(mut self, login: &str) -> Self {
        self.login = Some(login.to_string());
        self
    }

    /// Serve `pages` to searches whose query contains `fragment`.
    pub fn search_pages(mut self, fragment: &str, pages: Vec<Vec<SearchItem>>) -> Self {
        self.searches.push((fragment.to_string(), pages));
        self
    }

    /// Fail searches whose query contains `fragment`.
    pub fn failing_search(mut self, fragment: &str) -> Self {
        self.failing_searches.push(fragment.to_string());
        self
    }

    pub fn issue_comments(
        mut self,
        owner: &str,
        repo: &str,
        number: u64,
        pages: Vec<Vec<ThreadComment>>,
    ) -> Self {
        self.issue_comments
            .insert((owner.to_string(), repo.to_string(), number), pages);
        self
    }

    pub fn review_comments(
        mut self,
        owner: &str,
        repo: &str,
        number: u64,
        pages: Vec<Vec<ThreadComment>>,
    ) -> Self {
        self.review_comments
            .insert((owner.to_string(), repo.to_string(), number), pages);
        self
    }

    pub fn failing_issue_comments(mut self, number: u64) -> Self {
        self.failing_issue_comments.insert(number);
        self
    }

    pub fn failing_review_comments(mut self, number: u64) -> Self {
        self.failing_review_comments.insert(number);
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Page `page` (1-based) of `pages`, linking to the following page if any.
fn serve<T: Clone>(pages: Option<&Vec<Vec<T>>>, page: u32) -> Page<T> {
    let Some(pages) = pages else {
        return Page {
            items: vec![],
            next_page: None,
        };
    };
    let index = page.saturating_sub(1) as usize;
    Page {
        items: pages.get(index).cloned().unwrap_or_default(),
        next_page: (index + 1 < pages.len()).then_some(page + 1),
    }
}

fn key(owner: &str, repo: &str, number: u64) -> ThreadKey {
    (owner.to_string(), repo.to_string(), number)
}

#[async_trait::async_trait]
impl ActivityClient for FakeGitHub {
    async fn current_user_login(&self) -> Result<String> {
        self.record("user".to_string());
        self.login
            .clone()
            .ok_or_else(|| anyhow!("401 Requires authentication"))
    }

    async fn search_issues(
        &self,
        query: &str,
        sort: SearchSort,
        page: u32,
    ) -> Result<Page<SearchItem>> {
        self.record(format!("search page={page} sort={}", sort.as_str()));
        if self.failing_searches.iter().any(|f| query.contains(f.as_str())) {
            return Err(anyhow!("422 Validation Failed"));
        }
        let pages = self
            .searches
            .iter()
            .find(|(fragment, _)| query.contains(fragment.as_str()))
            .map(|(_, pages)| pages);
        Ok(serve(pages, page))
    }

    async fn list_issue_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        page: u32,
    ) -> Result<Page<ThreadComment>> {
        self.record(format!("issue_comments {owner}/{repo}#{number} page={page}"));
        if self.failing_issue_comments.contains(&number) {
            return Err(anyhow!("500 Internal Server Error"));
        }
        Ok(serve(self.issue_comments.get(&key(owner, repo, number)), page))
    }

    async fn list_review_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        page: u32,
    ) -> Result<Page<ThreadComment>> {
        self.record(format!("review_comments {owner}/{repo}#{number} page={page}"));
        if self.failing_review_comments.contains(&number) {
            return Err(anyhow!("500 Internal Server Error"));
        }
        Ok(serve(self.review_comments.get(&key(owner, repo, number)), page))
    }
}
