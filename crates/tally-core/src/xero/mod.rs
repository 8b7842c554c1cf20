//! Xero Accounting API access
//!
//! # Architecture
//!
//! - `TrackingApi` trait: the operations the tracking handlers need from Xero
//! - `XeroClient`: reqwest-based implementation talking to the real API
//! - `MockTrackingApi`: scripted implementation for unit tests
//!
//! The trait is the seam the MCP server is built against, so the server can
//! be exercised without network access.

mod client;
mod mock;

pub use client::XeroClient;
pub use mock::MockTrackingApi;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{TrackingOption, TrackingOptionEdit};

/// Tracking category operations backed by Xero
#[async_trait]
pub trait TrackingApi: Send + Sync {
    /// Apply one edit to a tracking option
    ///
    /// Returns the updated record, or `None` when Xero accepted the request
    /// but echoed no option back.
    async fn update_tracking_option(
        &self,
        tracking_category_id: &str,
        edit: &TrackingOptionEdit,
    ) -> Result<Option<TrackingOption>>;
}
