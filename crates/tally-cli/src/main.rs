//! Tally CLI - Xero tracking categories over MCP
//!
//! Usage:
//!   tally serve --port 3001   Start the MCP server over HTTP
//!   tally serve --stdio       Start the MCP server over stdin/stdout
//!   tally config              Show resolved configuration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so the stdio transport owns stdout
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port, host, stdio } => {
            commands::cmd_serve(&config, host.as_deref(), port, stdio).await
        }
        Commands::Config => commands::cmd_config(&config),
    }
}
