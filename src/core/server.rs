//! MCP Server implementation and lifecycle management.
//!
//! The handler lists the tool catalog and forwards every `tools/call` to the
//! [`ToolRegistry`]. Unknown tools and bad arguments come back as error
//! envelopes (`isError: true`), never as JSON-RPC faults.
//!
//! Tool execution is blocking HTTP, so each call runs on the blocking pool.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Error;
use crate::domains::tools::{Envelope, ToolRegistry};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Catalog and dispatcher shared by every connection.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let registry = Arc::new(ToolRegistry::new(config.clone()));
        Self { config, registry }
    }

    /// Create a server around an existing registry.
    pub fn with_registry(config: Arc<Config>, registry: Arc<ToolRegistry>) -> Self {
        Self { config, registry }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Run one tool call on the blocking pool.
    async fn run_tool(&self, name: String, arguments: JsonObject) -> crate::Result<Envelope> {
        let registry = self.registry.clone();
        tokio::task::spawn_blocking(move || registry.call_tool(&name, arguments))
            .await
            .map_err(|e| Error::internal(format!("Tool task failed: {e}")))
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools_json(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Returns the serialized `CallToolResult`; `Err` only for arguments that
    /// are not an object or a failed blocking task.
    pub async fn call_tool_json(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            _ => return Err("Tool arguments must be a JSON object".to_string()),
        };

        let envelope = self
            .run_tool(name.to_string(), arguments)
            .await
            .map_err(|e| e.to_string())?;

        serde_json::to_value(envelope.into_call_tool_result()).map_err(|e| e.to_string())
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "DNSimple domain management: list domains, check pricing and renewal costs, \
                 manage DNS records, disable auto-renew, transfer domains and manage whois privacy."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool");
        let envelope = self
            .run_tool(request.name.to_string(), request.arguments.unwrap_or_default())
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(envelope.into_call_tool_result())
    }
}
