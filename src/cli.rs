use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::config::ConfigCommands;
use crate::commands::digest::DigestArgs;

#[derive(Parser)]
#[command(
    name = "github-gas-server",
    version,
    about = "Summarizes your recent GitHub activity as an MCP prompt",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve the `gas` prompt over MCP on stdin/stdout
    Stdio,

    /// Print the activity digest once and exit
    Digest(DigestArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
