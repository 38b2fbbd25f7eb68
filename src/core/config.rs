//! Configuration management for the MCP server.
//!
//! Defaults are overridden by `MCP_*` environment variables, optionally
//! seeded from a `.env` file in the working directory.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

use crate::domains::registrar::secret_helper::SecretHelper;

/// Environment variable (and credential file key) holding the API token.
pub const TOKEN_VAR: &str = "DNSIMPLE_API_TOKEN";

/// Production DNSimple API.
pub const DEFAULT_API_BASE: &str = "https://api.dnsimple.com/v2";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Where the API token comes from.
    pub credentials: CredentialsConfig,

    /// Remote API settings.
    pub api: ApiConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Token sources. Holds locations only, never the token itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Environment variable checked first, also the key read from `env_file`.
    pub token_var: String,

    /// Per-user `KEY=value` credential file.
    pub env_file: Option<PathBuf>,

    /// Explicit secret helper executable, probed before the default locations.
    pub secret_helper: Option<PathBuf>,
}

impl CredentialsConfig {
    /// Secret helper locations in probing order.
    pub fn secret_helper_candidates(&self) -> Vec<PathBuf> {
        self.secret_helper
            .iter()
            .cloned()
            .chain(SecretHelper::default_candidates())
            .collect()
    }

    /// Directory holding the credential file.
    pub fn config_dir(&self) -> Option<&Path> {
        self.env_file.as_deref().and_then(Path::parent)
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            token_var: TOKEN_VAR.to_string(),
            env_file: default_env_file(),
            secret_helper: None,
        }
    }
}

/// DNSimple API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Upper bound on pages fetched by a single listing.
    pub max_pages: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: 30,
            max_pages: 1000,
        }
    }
}

/// `~/.config/dnsimple-mcp/.env`
fn default_env_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("dnsimple-mcp").join(".env"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "dnsimple-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_DNSIMPLE_API_BASE`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_DNSIMPLE_API_BASE") {
            info!("Using DNSimple API at {}", base_url);
            config.api.base_url = base_url;
        }

        if let Some(timeout) = parse_var("MCP_REQUEST_TIMEOUT_SECS") {
            config.api.timeout_secs = timeout;
        }

        if let Some(max_pages) = parse_var("MCP_MAX_PAGES") {
            config.api.max_pages = max_pages;
        }

        if let Ok(path) = std::env::var("MCP_CREDENTIALS_FILE") {
            config.credentials.env_file = Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("MCP_SECRET_HELPER") {
            config.credentials.secret_helper = Some(PathBuf::from(path));
        }

        config
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::config("MCP_DNSIMPLE_API_BASE must not be empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::config("MCP_REQUEST_TIMEOUT_SECS must be greater than 0"));
        }
        if self.api.max_pages == 0 {
            return Err(Error::config("MCP_MAX_PAGES must be greater than 0"));
        }
        Ok(())
    }

    /// Create the per-user config directory, if one is configured.
    pub fn ensure_config_dir(&self) -> Result<()> {
        if let Some(dir) = self.credentials.config_dir() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Parse `name` if set; an unparsable value is ignored with a warning.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}
