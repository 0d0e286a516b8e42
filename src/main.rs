mod cli;
mod commands;
mod infra;
mod mcp;
mod shared;
mod summarizer;


use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

use shared::env_var::EnvVars;

fn main() -> anyhow::Result<()> {
    let Cli { command } = Cli::parse();

    // Logs go to stderr; stdout carries the MCP transport.
    let _guard = shared::logging::init(&EnvVars::load());

    match command {
        Commands::Stdio => commands::stdio::run()?,
        Commands::Digest(args) => commands::digest::run(&args)?,
        Commands::Config(config_cmd) => config_cmd.run()?,
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "github-gas-server",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
