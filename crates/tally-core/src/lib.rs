//! Tally Core Library
//!
//! Shared functionality for the Tally Xero MCP server:
//! - Tool parameter and Xero wire models
//! - Configuration loading (embedded defaults, override file, environment)
//! - Xero Accounting API client behind the `TrackingApi` trait
//! - Handlers that carry tool requests to Xero
//! - Tool logic and response formatting (summaries, deep links)

pub mod config;
pub mod error;
pub mod format;
pub mod handlers;
pub mod models;
pub mod tools;
pub mod xero;

/// Test utilities including mock Xero API server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{Config, ServerSettings, XeroConfig};
pub use error::{Error, Result};
pub use models::{
    EditableStatus, TrackingOption, TrackingOptionEdit, TrackingOptionStatus,
    UpdateTrackingOptionsParams, MAX_TRACKING_OPTIONS_PER_REQUEST,
};
pub use tools::ToolReply;
pub use xero::{MockTrackingApi, TrackingApi, XeroClient};
