//! MCP Tool implementations for Tally
//!
//! Re-exports from tally_core::tools for MCP server use.
//! The actual implementations live in tally-core so they can be tested
//! without the MCP protocol layer.

pub use tally_core::models::{TrackingOptionEdit, UpdateTrackingOptionsParams};
pub use tally_core::tools::{update_tracking_options, validate_update_tracking_options, ToolReply};
