//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Which transport the server listens on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// Line-delimited JSON-RPC over TCP.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

#[cfg(feature = "tcp")]
impl TcpConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: default_host(),
        }
    }
}

#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Allow any origin, for browser-based clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl HttpConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(TcpConfig::default());
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

impl TransportConfig {
    /// Read `MCP_TRANSPORT` and the matching host/port variables.
    ///
    /// An unknown or disabled transport name falls back to the default.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig {
                port: env_port("MCP_TCP_PORT", 3000),
                host: std::env::var("MCP_TCP_HOST").unwrap_or_else(|_| default_host()),
            }),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig {
                port: env_port("MCP_HTTP_PORT", 8080),
                host: std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host()),
                rpc_path: std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_rpc_path()),
                enable_cors: std::env::var("MCP_HTTP_CORS")
                    .map(|v| parse_flag(&v))
                    .unwrap_or(true),
            }),
            _ => Self::default(),
        }
    }

    /// Human-readable summary for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}", cfg.bind_address()),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}{}", cfg.bind_address(), cfg.rpc_path),
        }
    }

    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn env_port(var: &str, default: u16) -> u16 {
    std::env::var(var)
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(default)
}

/// Anything but `false`/`0`/`no`/`off` counts as on.
#[cfg(feature = "http")]
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}
