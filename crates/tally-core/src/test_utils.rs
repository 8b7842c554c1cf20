//! Test utilities for tally-core
//!
//! This module provides a mock Xero Accounting API server that can be used
//! for development and integration tests.
//!
//! Behavior of `POST /TrackingCategories/{category}/Options/{option}`:
//! - missing or wrong bearer token → 401
//! - category `missing` → 404
//! - option ids starting with `invalid` → 400 validation exception
//! - option ids starting with `ghost` → 200 with no options
//! - anything else → 200 echoing the update

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// Token the mock server accepts
pub const MOCK_ACCESS_TOKEN: &str = "mock-access-token";

/// Tenant id used by tests talking to the mock server
pub const MOCK_TENANT_ID: &str = "mock-tenant";

/// One request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub tracking_category_id: String,
    pub tracking_option_id: String,
    pub tenant_id: Option<String>,
    pub body: Value,
}

type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

/// Mock Xero server for testing and development
pub struct MockXeroServer {
    addr: SocketAddr,
    requests: Recorded,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockXeroServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let requests: Recorded = Arc::default();
        let app = Router::new()
            .route(
                "/TrackingCategories/:category_id/Options/:option_id",
                post(handle_update_option),
            )
            .with_state(requests.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockXeroServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Tracking option update endpoint
async fn handle_update_option(
    State(requests): State<Recorded>,
    Path((category_id, option_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let tenant_id = headers
        .get("xero-tenant-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    requests.lock().unwrap().push(RecordedRequest {
        tracking_category_id: category_id.clone(),
        tracking_option_id: option_id.clone(),
        tenant_id,
        body: body.clone(),
    });

    let expected = format!("Bearer {}", MOCK_ACCESS_TOKEN);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "Type": null,
                "Title": "Unauthorized",
                "Status": 401,
                "Detail": "AuthenticationUnsuccessful"
            })),
        )
            .into_response();
    }

    if category_id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"Title": "NotFound", "Status": 404})),
        )
            .into_response();
    }

    if option_id.starts_with("invalid") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "ErrorNumber": 10,
                "Type": "ValidationException",
                "Message": "A validation exception occurred",
                "Elements": [{
                    "ValidationErrors": [{"Message": "Tracking option name must be unique"}]
                }]
            })),
        )
            .into_response();
    }

    if option_id.starts_with("ghost") {
        return Json(json!({"Status": "OK", "Options": []})).into_response();
    }

    let name = body
        .get("Name")
        .and_then(Value::as_str)
        .unwrap_or("Existing option");
    let status = body
        .get("Status")
        .and_then(Value::as_str)
        .unwrap_or("ACTIVE");

    Json(json!({
        "Id": "9f7c0e4e-0000-4000-8000-000000000000",
        "Status": "OK",
        "ProviderName": "Tally Mock",
        "Options": [{
            "TrackingOptionID": option_id,
            "Name": name,
            "Status": status
        }]
    }))
    .into_response()
}
