//! Text formatting and deep links for tool responses

use reqwest::Url;

use crate::models::TrackingOption;

/// Xero UI page for a tracking category
const TRACKING_CATEGORY_URL: &str = "https://go.xero.com/Setup/Tracking.aspx";

/// Deep link to a tracking category in the Xero web app
///
/// Deterministic: the same id always produces the same URL.
pub fn tracking_category_deep_link(tracking_category_id: &str) -> String {
    let mut url =
        Url::parse(TRACKING_CATEGORY_URL).expect("tracking category URL must be valid");
    url.query_pairs_mut()
        .append_pair("CategoryId", tracking_category_id);
    url.into()
}

/// Render one tracking option for display
pub fn format_tracking_option(option: &TrackingOption) -> String {
    format!(
        "Tracking Option ID: {}\nName: {}\nStatus: {}",
        option.tracking_option_id,
        option.name.as_deref().unwrap_or("(unnamed)"),
        option
            .status
            .map(|s| s.as_str())
            .unwrap_or("UNKNOWN"),
    )
}

/// Summary text for an update: counts followed by each updated option,
/// in the order given
pub fn update_summary(updated: &[TrackingOption], requested: usize) -> String {
    let listed = updated
        .iter()
        .map(format_tracking_option)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "{} out of {} tracking options updated:\n{}",
        updated.len(),
        requested,
        listed
    )
}
