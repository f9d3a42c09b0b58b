use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod command;
mod config;
mod domain;
mod host;
mod mcp;
mod refresh;
mod session;
mod source;
mod tree;
mod workspace;

use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_cli(&cli)?;

    // If --mcp flag is set, run as MCP server
    if cli.mcp {
        return mcp::run_mcp_server(&config).await;
    }

    match cli.command {
        Some(Commands::Status { json, expand_all }) => {
            command::run_status(&config, json, expand_all).await?;
        }
        Some(Commands::Watch { expand_all }) => {
            command::run_watch(&config, expand_all).await?;
        }
        Some(Commands::Init) => {
            command::run_init(&config).await?;
        }
        None => {
            // No command specified, show help
            eprintln!("No command specified. Use --help for usage information.");
            eprintln!("Use 'stackview status' to print the workspace tree or 'stackview --mcp' to start the MCP server.");
        }
    }

    Ok(())
}
