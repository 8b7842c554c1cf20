//! Integration tests for tally-core
//!
//! These tests exercise the full tool → handler → Xero client workflow
//! against the mock Xero server.

use serde_json::json;
use tally_core::{
    format::tracking_category_deep_link,
    test_utils::{MockXeroServer, MOCK_ACCESS_TOKEN, MOCK_TENANT_ID},
    tools, EditableStatus, Error, TrackingApi, TrackingOptionEdit, TrackingOptionStatus,
    UpdateTrackingOptionsParams, XeroClient,
};

fn client_for(server: &MockXeroServer) -> XeroClient {
    XeroClient::new(&server.url(), MOCK_TENANT_ID, MOCK_ACCESS_TOKEN)
}

// =============================================================================
// Xero Client Tests
// =============================================================================

#[tokio::test]
async fn test_client_sends_update() {
    let server = MockXeroServer::start().await;
    let client = client_for(&server);

    let edit = TrackingOptionEdit::new("opt-1")
        .with_name("North")
        .with_status(EditableStatus::Archived);
    let updated = client
        .update_tracking_option("cat-1", &edit)
        .await
        .expect("update should succeed")
        .expect("record should be returned");

    assert_eq!(updated.tracking_option_id, "opt-1");
    assert_eq!(updated.name.as_deref(), Some("North"));
    assert_eq!(updated.status, Some(TrackingOptionStatus::Archived));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].tracking_category_id, "cat-1");
    assert_eq!(requests[0].tracking_option_id, "opt-1");
    assert_eq!(requests[0].tenant_id.as_deref(), Some(MOCK_TENANT_ID));
    assert_eq!(requests[0].body, json!({"Name": "North", "Status": "ARCHIVED"}));
}

#[tokio::test]
async fn test_client_omits_unset_fields() {
    let server = MockXeroServer::start().await;
    let client = client_for(&server);

    client
        .update_tracking_option("cat-1", &TrackingOptionEdit::new("opt-1"))
        .await
        .unwrap();

    assert_eq!(server.requests()[0].body, json!({}));
}

#[tokio::test]
async fn test_client_empty_options_is_none() {
    let server = MockXeroServer::start().await;
    let client = client_for(&server);

    let result = client
        .update_tracking_option("cat-1", &TrackingOptionEdit::new("ghost-1"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_client_bad_token() {
    let server = MockXeroServer::start().await;
    let client = XeroClient::new(&server.url(), MOCK_TENANT_ID, "expired-token");

    let err = client
        .update_tracking_option("cat-1", &TrackingOptionEdit::new("opt-1"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Authentication failed"));
}

#[tokio::test]
async fn test_client_not_found() {
    let server = MockXeroServer::start().await;
    let client = client_for(&server);

    let err = client
        .update_tracking_option("missing", &TrackingOptionEdit::new("opt-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Xero { status: 404, .. }));
}

#[tokio::test]
async fn test_client_validation_error() {
    let server = MockXeroServer::start().await;
    let client = client_for(&server);

    let err = client
        .update_tracking_option("cat-1", &TrackingOptionEdit::new("invalid-1").with_name("Dup"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Tracking option name must be unique");
}

#[tokio::test]
async fn test_client_keeps_traversal_id_in_one_segment() {
    let server = MockXeroServer::start().await;
    let client = client_for(&server);

    let edit = TrackingOptionEdit::new("../../cat-2/Options/opt-9").with_name("Renamed");
    client.update_tracking_option("cat-1", &edit).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].tracking_category_id, "cat-1");
    assert_eq!(requests[0].tracking_option_id, "../../cat-2/Options/opt-9");
}

#[tokio::test]
async fn test_client_rejects_dot_segment_id() {
    let server = MockXeroServer::start().await;
    let client = client_for(&server);

    let err = client
        .update_tracking_option("cat-1", &TrackingOptionEdit::new(".."))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidData(_)));
    assert!(server.requests().is_empty());
}

// =============================================================================
// Tool Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_tool_keeps_query_characters_in_option_id() {
    let server = MockXeroServer::start().await;
    let client = client_for(&server);

    let params = UpdateTrackingOptionsParams {
        tracking_category_id: "cat-1".to_string(),
        options: vec![TrackingOptionEdit::new("opt-1?x=#frag")],
    };

    let reply = tools::update_tracking_options(&client, &params).await;

    assert!(!reply.is_error);
    assert!(reply.blocks[0].contains("Tracking Option ID: opt-1?x=#frag"));
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].tracking_category_id, "cat-1");
    assert_eq!(requests[0].tracking_option_id, "opt-1?x=#frag");
}

#[tokio::test]
async fn test_tool_partial_update() {
    let server = MockXeroServer::start().await;
    let client = client_for(&server);

    let params: UpdateTrackingOptionsParams = serde_json::from_value(json!({
        "trackingCategoryId": "abc123",
        "options": [
            {"trackingOptionId": "opt-1", "name": "North"},
            {"trackingOptionId": "ghost-2", "name": "Nowhere"},
            {"trackingOptionId": "opt-3", "status": "ARCHIVED"}
        ]
    }))
    .unwrap();

    let reply = tools::update_tracking_options(&client, &params).await;

    assert!(!reply.is_error);
    assert_eq!(reply.blocks.len(), 2);
    assert!(reply.blocks[0].contains("2 out of 3 tracking options updated"));
    assert!(reply.blocks[0].find("opt-1").unwrap() < reply.blocks[0].find("opt-3").unwrap());
    assert!(reply.blocks[1].ends_with(&tracking_category_deep_link("abc123")));
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn test_tool_error_stops_batch() {
    let server = MockXeroServer::start().await;
    let client = client_for(&server);

    let params = UpdateTrackingOptionsParams {
        tracking_category_id: "cat-1".to_string(),
        options: vec![
            TrackingOptionEdit::new("opt-1"),
            TrackingOptionEdit::new("invalid-2").with_name("Dup"),
            TrackingOptionEdit::new("opt-3"),
        ],
    };

    let reply = tools::update_tracking_options(&client, &params).await;

    assert!(reply.is_error);
    assert_eq!(
        reply.blocks,
        vec!["Error while updating tracking options: Tracking option name must be unique".to_string()]
    );
    // opt-3 is never sent
    assert_eq!(server.requests().len(), 2);
}
