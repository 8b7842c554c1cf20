//! Handlers that carry tool requests to Xero
//!
//! A handler owns the remote side of a tool: it talks to a `TrackingApi`
//! and returns domain records, leaving text shaping to `tools`.

use tracing::{info, warn};

use crate::error::Result;
use crate::models::{TrackingOption, TrackingOptionEdit};
use crate::xero::TrackingApi;

/// Update tracking options within one tracking category
///
/// Edits are sent one at a time in request order and the first failure
/// aborts the batch. Edits Xero returns no record for are left out of the
/// result, so the result may be shorter than `options`.
pub async fn update_tracking_options(
    api: &dyn TrackingApi,
    tracking_category_id: &str,
    options: &[TrackingOptionEdit],
) -> Result<Vec<TrackingOption>> {
    info!(
        "Updating {} tracking option(s) in category {}",
        options.len(),
        tracking_category_id
    );

    let mut updated = Vec::with_capacity(options.len());
    for edit in options {
        match api.update_tracking_option(tracking_category_id, edit).await? {
            Some(option) => updated.push(option),
            None => warn!(
                "Xero returned no record for tracking option {}",
                edit.tracking_option_id
            ),
        }
    }

    Ok(updated)
}
