//! Plain-text digest of collected activity.

use std::fmt::Write;

use super::comment::Comment;

/// Text returned when nothing was found.
pub const NO_ACTIVITY: &str = "No GitHub activity found";

const DELIMITER: &str = "*********************************";

/// Timestamps are always UTC, printed with an explicit zero offset.
const COMMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z UTC";

/// Render `comments` in their given order, or the no-activity sentinel when empty.
pub fn digest_text(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return NO_ACTIVITY.to_string();
    }
    render_entries(comments)
}

fn render_entries(comments: &[Comment]) -> String {
    let mut output = String::new();
    for comment in comments {
        // Writing to a String cannot fail.
        let _ = write_entry(&mut output, comment);
    }
    output
}

fn write_entry(output: &mut String, comment: &Comment) -> std::fmt::Result {
    writeln!(output, "{DELIMITER}")?;
    writeln!(output, "Issue URL: {}", comment.issue_url)?;
    writeln!(output, "Is Pull request?: {}", comment.is_pull_request)?;
    writeln!(output, "Issue Author: {}", comment.author)?;
    writeln!(
        output,
        "Comment date: {}",
        comment.created_at.format(COMMENT_DATE_FORMAT)
    )?;
    write!(
        output,
        "Comment in {}/{} #{} ({}) by {}:\n{}\n\n",
        comment.repo_owner,
        comment.repo_name,
        comment.issue_number,
        comment.issue_title,
        comment.author,
        comment.body
    )
}
