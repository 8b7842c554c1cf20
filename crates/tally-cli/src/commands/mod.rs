//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `config` - Config loading and the `config` command
//! - `serve` - MCP server command

pub mod config;
pub mod serve;

// Re-export command functions for main.rs
pub use config::*;
pub use serve::*;
