//! HTTP transport: JSON-RPC over POST.
//!
//! A stateless subset of MCP for plain HTTP clients (curl, scripts):
//! `initialize`, `ping`, `tools/list`, `tools/call` and notifications.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

/// MCP protocol revision reported by `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct HttpTransport {
    config: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

#[derive(Clone)]
struct AppState {
    server: McpServer,
    rpc_path: String,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.bind_address();

        let state = AppState {
            server,
            rpc_path: self.config.rpc_path.clone(),
        };

        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state);

        if self.config.enable_cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC at POST {}, CORS {})",
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        }
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", request.method.as_str());
    debug!("Received JSON-RPC request");
    (StatusCode::OK, Json(process_request(&state.server, request).await))
}

async fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(request.id, initialize_result(server)),
        "ping" => JsonRpcResponse::success(request.id, json!({})),
        "tools/list" => {
            JsonRpcResponse::success(request.id, json!({ "tools": server.list_tools_json() }))
        }
        "tools/call" => handle_tools_call(server, request).await,
        method if method.starts_with("notifications/") => {
            debug!("Notification: {}", method);
            JsonRpcResponse::success(request.id, Value::Null)
        }
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

fn initialize_result(server: &McpServer) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        }
    })
}

async fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let Some(params) = request.params else {
        return JsonRpcResponse::invalid_params(request.id, "Missing params");
    };

    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::invalid_params(request.id, "Missing tool name");
    };

    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

    match server.call_tool_json(name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}
