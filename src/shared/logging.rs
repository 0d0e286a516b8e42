//! Tracing setup.
//!
//! Logs always go to stderr: stdout is reserved for the MCP transport.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use super::env_var::EnvVars;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. The returned guard flushes pending log
/// lines on drop and must be held for the lifetime of the process.
pub fn init(env: &EnvVars) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_new(env.log.as_deref().unwrap_or(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false);

    // A subscriber may already be installed (e.g. in tests); keep the existing one.
    let _ = if wants_json(env) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    guard
}

fn wants_json(env: &EnvVars) -> bool {
    env.log_format
        .as_deref()
        .is_some_and(|format| format.eq_ignore_ascii_case("json"))
}
