//! Tally MCP Server
//!
//! Hosts the Tally tool router over Streamable HTTP or stdio.

pub mod mcp;


pub use mcp::{serve_stdio, start_mcp_server, TallyMcpServer};
