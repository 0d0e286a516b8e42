//! Search query construction.

use chrono::{DateTime, Utc};

/// Date format used in search qualifiers.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository scope and extra text shared by both queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryScope<'a> {
    pub repos: &'a [String],
    pub extra: Option<&'a str>,
}

impl QueryScope<'_> {
    fn apply(&self, mut query: String) -> String {
        for repo in self.repos {
            query.push_str(" repo:");
            query.push_str(repo);
        }
        self.append_extra(query)
    }

    fn append_extra(&self, mut query: String) -> String {
        if let Some(extra) = self.extra.map(str::trim).filter(|extra| !extra.is_empty()) {
            query.push(' ');
            query.push_str(extra);
        }
        query
    }
}

/// Issues and pull requests `author` was involved in, updated since `since`.
///
/// A non-empty `raw` query replaces the generated qualifiers and repo
/// clauses; the extra fragment is still appended.
pub fn participation_query(
    author: &str,
    since: DateTime<Utc>,
    scope: QueryScope<'_>,
    raw: Option<&str>,
) -> String {
    match raw.filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => scope.append_extra(raw.trim().to_string()),
        None => scope.apply(format!(
            "involves:{author} updated:>={}",
            since.format(DATE_FORMAT)
        )),
    }
}

/// Pull requests opened by `author` since `since`.
pub fn opened_prs_query(author: &str, since: DateTime<Utc>, scope: QueryScope<'_>) -> String {
    scope.apply(format!(
        "author:{author} type:pr created:>={}",
        since.format(DATE_FORMAT)
    ))
}
