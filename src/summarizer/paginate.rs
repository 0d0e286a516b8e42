//! Page walking shared by search, issue comment and review comment listings.
//!
//! Each page is handed back to the caller before the next one is requested.

use std::future::Future;

use crate::infra::github::Page;
use crate::infra::github::error::Result;

/// Tracks which page to request next.
///
/// Starts at page 1 and stops once a page reports no next page (or 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    next: Option<u32>,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self { next: Some(1) }
    }
}

impl PageCursor {
    /// Fetch the next page with `fetch`, or return None when exhausted.
    ///
    /// The caller processes the returned items before asking for the next page.
    pub async fn advance<T, F, Fut>(&mut self, fetch: F) -> Result<Option<Vec<T>>>
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let Some(page) = self.next else {
            return Ok(None);
        };
        let Page { items, next_page } = fetch(page).await?;
        self.next = next_page.filter(|next| *next != 0);
        tracing::debug!(page, items = items.len(), next = ?self.next, "fetched page");
        Ok(Some(items))
    }
}
