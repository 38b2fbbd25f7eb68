//! TCP transport: one rmcp service per connection, line-delimited JSON-RPC.

use std::net::SocketAddr;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Accept connections forever; each client gets its own task.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.bind_address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!("Failed to set TCP_NODELAY for {}: {}", peer, e);
                    }
                    tokio::spawn(serve_client(server.clone(), stream, peer));
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    // Avoid spinning on persistent accept errors.
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
            }
        }
    }
}

async fn serve_client(server: McpServer, stream: TcpStream, peer: SocketAddr) {
    info!("Accepted connection from {}", peer);

    let service = match server.serve(stream).await {
        Ok(service) => service,
        Err(e) => {
            warn!("Handshake with {} failed: {}", peer, e);
            return;
        }
    };

    match service.waiting().await {
        Ok(_) => info!("Client {} disconnected", peer),
        Err(e) => warn!("Error while serving {}: {}", peer, e),
    }
}
