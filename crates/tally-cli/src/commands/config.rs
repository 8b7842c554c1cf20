//! Configuration commands

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::config::{default_config_path, mask_secret, Config};
use tracing::debug;

/// Resolve configuration for this run
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::load(path).context("Failed to load configuration")?;
    match &config.source {
        Some(source) => debug!("Loaded configuration from {}", source.display()),
        None => debug!("No config file found, using built-in defaults"),
    }
    Ok(config)
}

pub fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", render_config(config));
    Ok(())
}

/// Human-readable view of the resolved configuration with secrets masked
pub fn render_config(config: &Config) -> String {
    let mut out = String::new();

    let source = match &config.source {
        Some(path) => path.display().to_string(),
        None => match default_config_path() {
            Some(path) => format!("built-in defaults ({} not found)", path.display()),
            None => "built-in defaults".to_string(),
        },
    };
    let _ = writeln!(out, "Config source: {}", source);
    let _ = writeln!(out);

    let _ = writeln!(out, "[xero]");
    let _ = writeln!(out, "  API base URL: {}", config.xero.api_base_url);
    let _ = writeln!(
        out,
        "  Tenant ID:    {}",
        config.xero.tenant_id.as_deref().unwrap_or("(not set)")
    );
    let _ = writeln!(
        out,
        "  Access token: {}",
        config
            .xero
            .access_token
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(|| "(not set)".to_string())
    );
    let _ = writeln!(out, "  Timeout:      {}s", config.xero.timeout.as_secs());
    let _ = writeln!(out);

    let _ = writeln!(out, "[server]");
    let _ = writeln!(
        out,
        "  Listen:       http://{}:{}/mcp",
        config.server.host, config.server.port
    );

    out
}
