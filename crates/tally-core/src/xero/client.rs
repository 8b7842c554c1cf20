//! Xero Accounting API client
//!
//! HTTP client for the Xero Accounting API 2.0. Authentication is out of
//! scope here: the client is handed an already-issued bearer token and the
//! tenant (organisation) id to address.
//!
//! # Configuration
//!
//! Environment variables (see `config`):
//! - `XERO_CLIENT_BEARER_TOKEN`: OAuth2 access token (required)
//! - `XERO_TENANT_ID`: Organisation id (required)
//! - `XERO_API_BASE_URL`: API root (default: https://api.xero.com/api.xro/2.0)

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode, Url};
use tracing::{debug, warn};

use crate::config::XeroConfig;
use crate::error::{Error, Result};
use crate::models::{
    TrackingOption, TrackingOptionEdit, TrackingOptionUpdate, TrackingOptionsEnvelope,
    XeroErrorBody,
};

use super::TrackingApi;

/// Header carrying the organisation id on every Accounting API call
const TENANT_HEADER: &str = "xero-tenant-id";

/// Xero Accounting API client
#[derive(Clone)]
pub struct XeroClient {
    http_client: Client,
    base_url: String,
    tenant_id: String,
    access_token: String,
}

impl std::fmt::Debug for XeroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XeroClient")
            .field("base_url", &self.base_url)
            .field("tenant_id", &self.tenant_id)
            .finish_non_exhaustive()
    }
}

impl XeroClient {
    /// Create a client with default HTTP settings
    pub fn new(base_url: &str, tenant_id: &str, access_token: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant_id: tenant_id.to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Create a client from resolved configuration
    ///
    /// Fails when the tenant id or access token is missing.
    pub fn from_config(config: &XeroConfig) -> Result<Self> {
        let tenant_id = config.tenant_id.as_deref().ok_or_else(|| {
            Error::Config("Xero tenant id is not set (XERO_TENANT_ID)".to_string())
        })?;
        let access_token = config.access_token.as_deref().ok_or_else(|| {
            Error::Config("Xero access token is not set (XERO_CLIENT_BEARER_TOKEN)".to_string())
        })?;

        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tenant_id: tenant_id.to_string(),
            access_token: access_token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// URL for a single tracking option, each id encoded as one path segment
    fn tracking_option_url(
        &self,
        tracking_category_id: &str,
        tracking_option_id: &str,
    ) -> Result<Url> {
        let category = path_segment(tracking_category_id)?;
        let option = path_segment(tracking_option_id)?;

        let mut url = Url::parse(&self.base_url).map_err(|e| {
            Error::Config(format!("Invalid Xero API base URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                Error::Config(format!("Xero API base URL '{}' cannot have a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["TrackingCategories", category, "Options", option]);
        Ok(url)
    }
}

/// Ids that cannot stand as a single URL path segment
fn path_segment(id: &str) -> Result<&str> {
    match id.trim() {
        "" | "." | ".." => Err(Error::InvalidData(format!(
            "'{}' is not a valid Xero id",
            id
        ))),
        _ => Ok(id),
    }
}

#[async_trait]
impl TrackingApi for XeroClient {
    async fn update_tracking_option(
        &self,
        tracking_category_id: &str,
        edit: &TrackingOptionEdit,
    ) -> Result<Option<TrackingOption>> {
        let url = self.tracking_option_url(tracking_category_id, &edit.tracking_option_id)?;
        let body = TrackingOptionUpdate::from(edit);

        debug!("POST {}", url);
        let response = self
            .http_client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(TENANT_HEADER, &self.tenant_id)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let envelope: TrackingOptionsEnvelope = response.json().await?;
        Ok(envelope.options.into_iter().next())
    }
}

/// Turn a non-success response into an `Error::Xero` with a readable message
async fn api_error(response: Response) -> Error {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body: XeroErrorBody = serde_json::from_str(&text).unwrap_or_default();
    warn!("Xero API returned {}: {}", status, text);

    Error::Xero {
        status: status.as_u16(),
        message: error_message(status, &body),
    }
}

fn error_message(status: StatusCode, body: &XeroErrorBody) -> String {
    match status {
        StatusCode::UNAUTHORIZED => {
            "Authentication failed. Please check your Xero credentials.".to_string()
        }
        StatusCode::FORBIDDEN => {
            "You don't have permission to access this resource in Xero.".to_string()
        }
        StatusCode::NOT_FOUND => "The requested resource was not found in Xero.".to_string(),
        StatusCode::TOO_MANY_REQUESTS => {
            "Too many requests to Xero. Please try again in a moment.".to_string()
        }
        _ => body
            .detail
            .as_deref()
            .or_else(|| body.validation_message())
            .or(body.message.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "An error occurred while communicating with Xero (HTTP {}).",
                    status.as_u16()
                )
            }),
    }
}
