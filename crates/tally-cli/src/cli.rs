//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Manage Xero tracking categories from MCP clients
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "MCP server for Xero tracking categories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.config/tally/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the MCP server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Serve MCP over stdin/stdout instead of HTTP
        ///
        /// Use this when an MCP client launches tally as a subprocess.
        #[arg(long, conflicts_with_all = ["port", "host"])]
        stdio: bool,
    },

    /// Show the resolved configuration (secrets masked)
    Config,
}
