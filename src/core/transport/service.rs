//! Transport service - starts the configured transport.

use tracing::info;

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Serve `server` until the transport shuts down.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => TcpTransport::new(cfg).run(server).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server).await,
        }
    }
}
