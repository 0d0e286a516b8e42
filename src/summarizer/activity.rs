use std::fmt;

use tracing::warn;

use super::Summarizer;
use super::comment::Comment;
use crate::infra::github::ActivityClient;
use crate::infra::github::error::Result;

/// One of the two independent retrievals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Participation,
    OpenedPullRequests,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Participation => write!(f, "participation comments"),
            Self::OpenedPullRequests => write!(f, "opened pull requests"),
        }
    }
}

#[derive(Debug)]
pub struct BranchFailure {
    pub branch: Branch,
    pub error: anyhow::Error,
}

/// Merged result of both retrievals.
///
/// A failed retrieval contributes no records and is listed in `failures`.
#[derive(Debug, Default)]
pub struct Activity {
    /// Participation comments first, then opened pull requests.
    pub comments: Vec<Comment>,
    pub failures: Vec<BranchFailure>,
}

impl Activity {
    fn absorb(&mut self, branch: Branch, result: Result<Vec<Comment>>) {
        match result {
            Ok(comments) => self.comments.extend(comments),
            Err(error) => {
                warn!(branch = %branch, error = format!("{error:#}"), "retrieval failed, omitting its results");
                self.failures.push(BranchFailure { branch, error });
            }
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failed_branches(&self) -> Vec<Branch> {
        self.failures.iter().map(|failure| failure.branch).collect()
    }
}

impl<C: ActivityClient> Summarizer<C> {
    /// Run both retrievals concurrently and merge them.
    pub async fn collect_activity(&self) -> Activity {
        let (participation, opened) =
            tokio::join!(self.recent_participation_comments(), self.opened_pull_requests());

        let mut activity = Activity::default();
        activity.absorb(Branch::Participation, participation);
        activity.absorb(Branch::OpenedPullRequests, opened);
        activity
    }
}
