//! GitHub API error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Failed to build GitHub client: {0}")]
    ClientBuild(String),

    #[error("Invalid GitHub API URL {0}")]
    InvalidBaseUrl(String),

    #[error("{}", format_octocrab_error(.0))]
    ApiError(#[from] octocrab::Error),
}

/// Format octocrab::Error to extract detailed error information from GitHub API responses.
fn format_octocrab_error(err: &octocrab::Error) -> String {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            let mut msg = format!(
                "GitHub API error: {} (HTTP {})",
                source.message,
                source.status_code.as_u16()
            );

            // Add detailed error information if available
            if let Some(errors) = &source.errors {
                msg.push_str(&format_error_details(errors));
            }

            msg
        }
        // For other error types, use the default Display implementation
        _ => format!("GitHub API error: {err}"),
    }
}

pub type Result<T> = anyhow::Result<T>;

/// Format error details from GitHub API errors array.
/// Returns a formatted string like "[field1 is code1, field2 is code2]" or empty string.
fn format_error_details(errors: &[serde_json::Value]) -> String {
    let error_details: Vec<String> = errors
        .iter()
        .filter_map(|e| {
            let field = e.get("field").and_then(|v| v.as_str());
            let code = e.get("code").and_then(|v| v.as_str());
            match (field, code) {
                (Some(f), Some(c)) => Some(format!("{f} is {c}")),
                (Some(f), None) => Some(f.to_string()),
                (None, Some(c)) => Some(c.to_string()),
                (None, None) => None,
            }
        })
        .collect();

    if error_details.is_empty() {
        String::new()
    } else {
        format!(" [{}]", error_details.join(", "))
    }
}
