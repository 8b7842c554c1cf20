//! Configuration for Tally
//!
//! ## Configuration Resolution
//!
//! Config is resolved in three layers, later layers winning:
//! 1. Embedded defaults (compiled into binary)
//! 2. Override file: an explicit path, or ~/.config/tally/config.toml if present
//! 3. Environment variables (`XERO_API_BASE_URL`, `XERO_TENANT_ID`,
//!    `XERO_CLIENT_BEARER_TOKEN`, `XERO_TIMEOUT_SECS`)

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

pub const ENV_API_BASE_URL: &str = "XERO_API_BASE_URL";
pub const ENV_TENANT_ID: &str = "XERO_TENANT_ID";
pub const ENV_ACCESS_TOKEN: &str = "XERO_CLIENT_BEARER_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "XERO_TIMEOUT_SECS";

/// Settings for talking to the Xero Accounting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XeroConfig {
    /// Accounting API root, without trailing slash
    pub api_base_url: String,
    /// Organisation the requests are addressed to (`xero-tenant-id` header)
    pub tenant_id: Option<String>,
    /// Pre-issued OAuth2 bearer token
    pub access_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for XeroConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.xero.com/api.xro/2.0".to_string(),
            tenant_id: None,
            access_token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Settings for the MCP HTTP listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub xero: XeroConfig,
    pub server: ServerSettings,
    /// Override file that was applied, if any
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load config from defaults, the override file, and the process environment
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(override_path, &env)
    }

    /// Load config using the given environment map instead of the process environment
    pub fn load_with_env(
        override_path: Option<&Path>,
        env: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut config = parse_config(DEFAULT_CONFIG)?;

        let path = match override_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(path) = path {
            debug!("Loading config override from {}", path.display());
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let raw = parse_raw(&content)?;
            raw.apply_to(&mut config);
            config.source = Some(path);
        }

        apply_env(&mut config, env)?;
        Ok(config)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tally").join("config.toml"))
}

/// Secrets shorter than this are masked entirely
const MIN_UNMASKED_SECRET_LEN: usize = 12;

/// Mask a secret for display, keeping only the last four characters of
/// long secrets
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < MIN_UNMASKED_SECRET_LEN {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    xero: Option<RawXero>,
    server: Option<RawServer>,
}

#[derive(Debug, Default, Deserialize)]
struct RawXero {
    api_base_url: Option<String>,
    tenant_id: Option<String>,
    access_token: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
}

impl RawConfig {
    fn apply_to(self, config: &mut Config) {
        if let Some(xero) = self.xero {
            if let Some(url) = xero.api_base_url {
                config.xero.api_base_url = url.trim_end_matches('/').to_string();
            }
            if let Some(tenant) = xero.tenant_id {
                config.xero.tenant_id = non_empty(tenant);
            }
            if let Some(token) = xero.access_token {
                config.xero.access_token = non_empty(token);
            }
            if let Some(secs) = xero.timeout_secs {
                config.xero.timeout = Duration::from_secs(secs);
            }
        }
        if let Some(server) = self.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
        }
    }
}

fn parse_raw(content: &str) -> Result<RawConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))
}

/// Parse config from TOML content on top of the built-in defaults
fn parse_config(content: &str) -> Result<Config> {
    let mut config = Config::default();
    parse_raw(content)?.apply_to(&mut config);
    Ok(config)
}

fn apply_env(config: &mut Config, env: &HashMap<String, String>) -> Result<()> {
    if let Some(url) = env.get(ENV_API_BASE_URL).filter(|s| !s.is_empty()) {
        config.xero.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(tenant) = env.get(ENV_TENANT_ID).filter(|s| !s.is_empty()) {
        config.xero.tenant_id = Some(tenant.clone());
    }
    if let Some(token) = env.get(ENV_ACCESS_TOKEN).filter(|s| !s.is_empty()) {
        config.xero.access_token = Some(token.clone());
    }
    if let Some(secs) = env.get(ENV_TIMEOUT_SECS).filter(|s| !s.is_empty()) {
        let secs: u64 = secs.parse().map_err(|_| {
            Error::Config(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
        })?;
        config.xero.timeout = Duration::from_secs(secs);
    }
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.xero.api_base_url, "https://api.xero.com/api.xro/2.0");
        assert_eq!(config.xero.timeout, Duration::from_secs(30));
        assert!(config.xero.tenant_id.is_none());
        assert!(config.xero.access_token.is_none());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
            [xero]
            tenant_id = "tenant-1"
            api_base_url = "http://localhost:9000/"
            "#,
        )
        .unwrap();
        assert_eq!(config.xero.tenant_id.as_deref(), Some("tenant-1"));
        assert_eq!(config.xero.api_base_url, "http://localhost:9000");
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config("[xero\ntenant_id = ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = parse_config(
            r#"
            [xero]
            tenant_id = "  "
            access_token = ""
            "#,
        )
        .unwrap();
        assert!(config.xero.tenant_id.is_none());
        assert!(config.xero.access_token.is_none());
    }

    #[test]
    fn test_load_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [xero]
            tenant_id = "file-tenant"
            access_token = "file-token"
            timeout_secs = 5

            [server]
            port = 4100
            "#
        )
        .unwrap();

        let config = Config::load_with_env(Some(file.path()), &HashMap::new()).unwrap();
        assert_eq!(config.xero.tenant_id.as_deref(), Some("file-tenant"));
        assert_eq!(config.xero.access_token.as_deref(), Some("file-token"));
        assert_eq!(config.xero.timeout, Duration::from_secs(5));
        assert_eq!(config.server.port, 4100);
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [xero]
            tenant_id = "file-tenant"
            access_token = "file-token"
            "#
        )
        .unwrap();

        let env = env(&[
            (ENV_TENANT_ID, "env-tenant"),
            (ENV_API_BASE_URL, "http://127.0.0.1:8080/"),
            (ENV_TIMEOUT_SECS, "12"),
        ]);
        let config = Config::load_with_env(Some(file.path()), &env).unwrap();
        assert_eq!(config.xero.tenant_id.as_deref(), Some("env-tenant"));
        assert_eq!(config.xero.access_token.as_deref(), Some("file-token"));
        assert_eq!(config.xero.api_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.xero.timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_env_invalid_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let env = env(&[(ENV_TIMEOUT_SECS, "soon")]);
        let result = Config::load_with_env(Some(&path), &env);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let result = Config::load_with_env(Some(&path), &HashMap::new());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefgh1234"), "****1234");
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret(""), "****");
    }

    #[test]
    fn test_mask_secret_hides_short_secrets() {
        assert_eq!(mask_secret("abcde"), "****");
        assert_eq!(mask_secret("abcdefgh123"), "****");
        assert_eq!(mask_secret("ключ-секрет-42"), "****т-42");
    }
}
