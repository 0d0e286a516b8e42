//! Model Context Protocol server over newline-delimited stdio.
//!
//! Only the prompt surface is implemented: `initialize`, `ping`,
//! `prompts/list` and `prompts/get`.

mod error;
mod prompt;
pub mod protocol;
mod server;

pub use prompt::ActivityPrompt;
pub use server::McpServer;
