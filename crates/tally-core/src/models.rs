//! Data models for Xero tracking categories and options
//!
//! Two serde shapes live here:
//! - Tool-facing types (`TrackingOptionEdit`, `UpdateTrackingOptionsParams`) use
//!   camelCase and carry JSON Schema for the MCP tool definition.
//! - Xero wire types (`TrackingOption`, `TrackingOptionsEnvelope`, ...) use
//!   Xero's PascalCase field names.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of tracking options accepted in one update request
pub const MAX_TRACKING_OPTIONS_PER_REQUEST: usize = 10;

// =============================================================================
// Status enums
// =============================================================================

/// Status a caller may set on a tracking option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EditableStatus {
    Active,
    Archived,
}

impl EditableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Archived => "ARCHIVED",
        }
    }
}

/// Status of a tracking option as reported by Xero
///
/// Xero also uses `DELETED` for options that were removed but are still
/// referenced by historical transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrackingOptionStatus {
    Active,
    Archived,
    Deleted,
}

impl TrackingOptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Archived => "ARCHIVED",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for TrackingOptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EditableStatus> for TrackingOptionStatus {
    fn from(status: EditableStatus) -> Self {
        match status {
            EditableStatus::Active => Self::Active,
            EditableStatus::Archived => Self::Archived,
        }
    }
}

// =============================================================================
// Tool parameters
// =============================================================================

/// A partial update to one tracking option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingOptionEdit {
    #[schemars(description = "ID of the tracking option to update")]
    pub tracking_option_id: String,

    #[schemars(description = "New name for the tracking option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[schemars(description = "New status for the tracking option: ACTIVE or ARCHIVED")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EditableStatus>,
}

impl TrackingOptionEdit {
    pub fn new(tracking_option_id: impl Into<String>) -> Self {
        Self {
            tracking_option_id: tracking_option_id.into(),
            name: None,
            status: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_status(mut self, status: EditableStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Parameters for the `update-tracking-options` tool
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrackingOptionsParams {
    #[schemars(description = "ID of the tracking category that owns the options")]
    pub tracking_category_id: String,

    #[schemars(description = "Tracking options to update (at most 10)")]
    #[schemars(with = "Vec<TrackingOptionEdit>", length(max = 10))]
    #[serde(deserialize_with = "deserialize_bounded_options")]
    pub options: Vec<TrackingOptionEdit>,
}

/// Reject option lists longer than `MAX_TRACKING_OPTIONS_PER_REQUEST` while
/// deserializing, so oversized requests never reach the handler.
fn deserialize_bounded_options<'de, D>(deserializer: D) -> Result<Vec<TrackingOptionEdit>, D::Error>
where
    D: Deserializer<'de>,
{
    let options = Vec::<TrackingOptionEdit>::deserialize(deserializer)?;
    if options.len() > MAX_TRACKING_OPTIONS_PER_REQUEST {
        return Err(serde::de::Error::invalid_length(
            options.len(),
            &"at most 10 tracking options",
        ));
    }
    Ok(options)
}

// =============================================================================
// Xero wire types
// =============================================================================

/// A tracking option record returned by Xero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingOption {
    #[serde(rename = "TrackingOptionID")]
    pub tracking_option_id: String,

    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "Status", default)]
    pub status: Option<TrackingOptionStatus>,

    #[serde(
        rename = "TrackingCategoryID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tracking_category_id: Option<String>,
}

/// Body sent to Xero when updating a tracking option
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackingOptionUpdate {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<TrackingOptionStatus>,
}

impl From<&TrackingOptionEdit> for TrackingOptionUpdate {
    fn from(edit: &TrackingOptionEdit) -> Self {
        Self {
            name: edit.name.clone(),
            status: edit.status.map(Into::into),
        }
    }
}

/// Xero response envelope for tracking option endpoints
#[derive(Debug, Default, Deserialize)]
pub struct TrackingOptionsEnvelope {
    #[serde(rename = "Options", default)]
    pub options: Vec<TrackingOption>,
}

/// Error payload returned by the Xero API
///
/// Xero uses two shapes: problem-details style (`Title`/`Detail`) for auth
/// failures and `Message`/`Elements` for validation exceptions.
#[derive(Debug, Default, Deserialize)]
pub struct XeroErrorBody {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,

    #[serde(rename = "Detail", default)]
    pub detail: Option<String>,

    #[serde(rename = "Message", default)]
    pub message: Option<String>,

    #[serde(rename = "Elements", default)]
    pub elements: Vec<XeroErrorElement>,
}

#[derive(Debug, Default, Deserialize)]
pub struct XeroErrorElement {
    #[serde(rename = "ValidationErrors", default)]
    pub validation_errors: Vec<XeroValidationError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct XeroValidationError {
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

impl XeroErrorBody {
    /// First validation message in the payload, if any
    pub fn validation_message(&self) -> Option<&str> {
        self.elements
            .iter()
            .flat_map(|e| e.validation_errors.iter())
            .find_map(|v| v.message.as_deref())
    }
}
