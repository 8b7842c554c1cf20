//! Server command implementation

use std::sync::Arc;

use anyhow::{Context, Result};
use tally_core::{Config, TrackingApi, XeroClient};

pub async fn cmd_serve(
    config: &Config,
    host: Option<&str>,
    port: Option<u16>,
    stdio: bool,
) -> Result<()> {
    let client = XeroClient::from_config(&config.xero)
        .context("Cannot start without Xero credentials")?;
    let api: Arc<dyn TrackingApi> = Arc::new(client);

    if stdio {
        // stdout belongs to the protocol; keep banners off it
        return tally_server::serve_stdio(api).await;
    }

    let host = host.unwrap_or(config.server.host.as_str());
    let port = port.unwrap_or(config.server.port);

    println!("🚀 Starting Tally MCP server...");
    println!("   Xero API: {}", config.xero.api_base_url);
    println!(
        "   Tenant: {}",
        config.xero.tenant_id.as_deref().unwrap_or_default()
    );
    println!("   MCP endpoint: http://{}:{}/mcp", host, port);
    println!();

    tally_server::start_mcp_server(api, host, port).await
}
