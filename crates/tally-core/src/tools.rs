//! Tool implementations for Tally
//!
//! Each tool takes its deserialized parameters, makes its call through a
//! handler, and shapes the outcome into text blocks. The MCP server wraps
//! these blocks into protocol content.

use tracing::warn;

use crate::error::{Error, Result};
use crate::format::{tracking_category_deep_link, update_summary};
use crate::handlers;
use crate::models::UpdateTrackingOptionsParams;
use crate::xero::TrackingApi;

/// Text blocks produced by a tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
    pub blocks: Vec<String>,
    /// The remote call failed; `blocks` holds the single error message
    pub is_error: bool,
}

impl ToolReply {
    pub fn success(blocks: Vec<String>) -> Self {
        Self {
            blocks,
            is_error: false,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            blocks: vec![message],
            is_error: true,
        }
    }
}

// =============================================================================
// update-tracking-options
// =============================================================================

/// Ids are addressed as URL path segments, so blank and dot-only ids are out
fn is_unusable_id(id: &str) -> bool {
    matches!(id.trim(), "" | "." | "..")
}

/// Structural checks serde cannot express
pub fn validate_update_tracking_options(params: &UpdateTrackingOptionsParams) -> Result<()> {
    if is_unusable_id(&params.tracking_category_id) {
        return Err(Error::InvalidData(format!(
            "trackingCategoryId must be a Xero id, got {:?}",
            params.tracking_category_id
        )));
    }
    if let Some(edit) = params
        .options
        .iter()
        .find(|o| is_unusable_id(&o.tracking_option_id))
    {
        return Err(Error::InvalidData(format!(
            "trackingOptionId must be a Xero id, got {:?} (option named {:?})",
            edit.tracking_option_id,
            edit.name.as_deref().unwrap_or("")
        )));
    }
    Ok(())
}

/// Update tracking options and describe the outcome
pub async fn update_tracking_options(
    api: &dyn TrackingApi,
    params: &UpdateTrackingOptionsParams,
) -> ToolReply {
    let result =
        handlers::update_tracking_options(api, &params.tracking_category_id, &params.options)
            .await;

    match result {
        Ok(updated) => {
            let deep_link = tracking_category_deep_link(&params.tracking_category_id);
            ToolReply::success(vec![
                update_summary(&updated, params.options.len()),
                format!("Link to view tracking category: {}", deep_link),
            ])
        }
        Err(e) => {
            warn!("update-tracking-options failed: {}", e);
            ToolReply::error(format!("Error while updating tracking options: {}", e))
        }
    }
}
