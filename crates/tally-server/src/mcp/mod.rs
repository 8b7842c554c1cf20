//! MCP (Model Context Protocol) Server for Tally
//!
//! Exposes Xero tracking operations to LLMs via MCP tools.
//!
//! # Architecture
//!
//! The server is built against `TrackingApi`, so the same router serves the
//! real Xero client in production and a mock in tests. Two transports are
//! supported: Streamable HTTP (HTTP/SSE) for network clients and stdio for
//! desktop clients that spawn the binary.
//!
//! # Example
//!
//! ```bash
//! # Streamable HTTP on port 3001
//! tally serve --port 3001
//!
//! # stdio, for Claude Desktop style launchers
//! tally serve --stdio
//! ```
//!
//! # Available Tools
//!
//! - `update-tracking-options` - Rename or archive/activate up to 10 tracking
//!   options in a tracking category

mod tools;

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use tally_core::TrackingApi;

pub use tools::*;

/// Tally MCP Server state
#[derive(Clone)]
pub struct TallyMcpServer {
    /// Xero tracking operations
    api: Arc<dyn TrackingApi>,
    /// Tool router for MCP operations
    pub(crate) tool_router: ToolRouter<Self>,
}

impl TallyMcpServer {
    /// Create a new MCP server backed by the given tracking API
    pub fn new(api: Arc<dyn TrackingApi>) -> Self {
        Self {
            api,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for TallyMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tally".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Tally for Xero".to_string()),
                website_url: Some("https://github.com/tally-mcp/tally".to_string()),
                icons: None,
            },
            instructions: Some(
                "Tally manages tracking categories in a Xero organisation. \
                 Use update-tracking-options to rename tracking options or change their status. \
                 Always show the returned Xero link to the user."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl TallyMcpServer {
    /// Update tracking options for a tracking category
    #[tool(
        name = "update-tracking-options",
        description = "Updates tracking options for a tracking category in Xero. A deep link to the tracking category is returned. This deep link can be used to view the tracking category along with the updated options in Xero directly. This link should be displayed to the user."
    )]
    pub async fn update_tracking_options(
        &self,
        Parameters(params): Parameters<UpdateTrackingOptionsParams>,
    ) -> Result<CallToolResult, McpError> {
        validate_update_tracking_options(&params)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let reply = tools::update_tracking_options(self.api.as_ref(), &params).await;
        Ok(into_call_tool_result(reply))
    }
}

/// Wrap tool text blocks into MCP content
fn into_call_tool_result(reply: ToolReply) -> CallToolResult {
    let content = reply.blocks.into_iter().map(Content::text).collect();
    if reply.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

/// Start the MCP server on the given port
pub async fn start_mcp_server(
    api: Arc<dyn TrackingApi>,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
    use rmcp::transport::streamable_http_server::StreamableHttpService;

    info!("Starting MCP server at http://{}:{}/mcp", host, port);

    let service = StreamableHttpService::new(
        move || Ok(TallyMcpServer::new(api.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = axum::Router::new()
        .nest_service("/mcp", service)
        .layer(TraceLayer::new_for_http());
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("MCP server ready at http://{}/mcp", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            // Wait for shutdown signal
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

/// Serve MCP over stdin/stdout until the client disconnects
pub async fn serve_stdio(api: Arc<dyn TrackingApi>) -> anyhow::Result<()> {
    info!("Serving MCP over stdio");

    let service = TallyMcpServer::new(api)
        .serve(rmcp::transport::stdio())
        .await?;
    let reason = service.waiting().await?;

    info!("MCP stdio session ended: {:?}", reason);
    Ok(())
}
