//! STDIO transport: the default MCP mode. Logs go to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let name = server.name().to_string();

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        info!("{} ready on stdin/stdout", name);

        service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("STDIO transport finished");
        Ok(())
    }
}
