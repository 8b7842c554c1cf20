//! Mock tracking API for testing
//!
//! Echoes edits back as updated records so handler and tool behavior can be
//! tested without a Xero server. Specific options can be scripted to come
//! back empty, and the whole API can be made to fail.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{TrackingOption, TrackingOptionEdit, TrackingOptionStatus};

use super::TrackingApi;

/// Mock tracking API
///
/// Records every call it receives, in order.
#[derive(Clone, Default)]
pub struct MockTrackingApi {
    /// Option ids for which no record is returned
    pub skipped: HashSet<String>,
    /// When set, every call fails with this message
    pub failure: Option<String>,
    calls: Arc<Mutex<Vec<(String, TrackingOptionEdit)>>>,
}

impl MockTrackingApi {
    /// Create a mock that echoes every edit back
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose calls all fail with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Return no record for the given option id
    pub fn skipping(mut self, tracking_option_id: &str) -> Self {
        self.skipped.insert(tracking_option_id.to_string());
        self
    }

    /// Calls received so far as (category id, edit) pairs
    pub fn calls(&self) -> Vec<(String, TrackingOptionEdit)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TrackingApi for MockTrackingApi {
    async fn update_tracking_option(
        &self,
        tracking_category_id: &str,
        edit: &TrackingOptionEdit,
    ) -> Result<Option<TrackingOption>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((tracking_category_id.to_string(), edit.clone()));
        }

        if let Some(message) = &self.failure {
            return Err(Error::Xero {
                status: 400,
                message: message.clone(),
            });
        }

        if self.skipped.contains(&edit.tracking_option_id) {
            return Ok(None);
        }

        Ok(Some(TrackingOption {
            tracking_option_id: edit.tracking_option_id.clone(),
            name: edit
                .name
                .clone()
                .or_else(|| Some(format!("Option {}", edit.tracking_option_id))),
            status: Some(
                edit.status
                    .map(Into::into)
                    .unwrap_or(TrackingOptionStatus::Active),
            ),
            tracking_category_id: Some(tracking_category_id.to_string()),
        }))
    }
}
