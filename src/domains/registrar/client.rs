//! HTTP plumbing for the DNSimple API.
//!
//! Handlers never touch `reqwest` directly: they build an [`ApiRequest`] and
//! hand it to an [`HttpBackend`] through an [`ApiClient`]. Production code
//! uses [`ReqwestBackend`]; tests plug in an in-memory registrar.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use super::credentials::Credential;
use super::error::RegistrarError;
use crate::core::config::ApiConfig;

/// A single outbound call, relative to the API base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a query parameter by key.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw status and body of an API answer.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Build a response from a JSON value.
    pub fn json_body(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Whether the status is one of `accepted`.
    pub fn is_status(&self, accepted: &[u16]) -> bool {
        accepted.contains(&self.status)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn any non-2xx answer into [`RegistrarError::Status`].
    pub fn error_for_status(self) -> Result<Self, RegistrarError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RegistrarError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    /// Decode the body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RegistrarError> {
        serde_json::from_str(&self.body)
            .map_err(|e| RegistrarError::malformed(format!("JSON parse error: {e}")))
    }

    /// The `data` member of the body, if the body is JSON and carries one.
    pub fn data(&self) -> Option<Value> {
        serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|mut v| v.get_mut("data").map(Value::take))
    }

    /// Best-effort human readable error: the `message` field, else the raw body.
    pub fn error_message(&self) -> String {
        serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| self.body.clone())
    }
}

/// Something that can execute an [`ApiRequest`] with a bearer token.
pub trait HttpBackend: Send + Sync {
    fn send(&self, token: &Credential, request: &ApiRequest) -> Result<ApiResponse, RegistrarError>;
}

/// Blocking `reqwest` backend.
///
/// Must be created and dropped outside of an async context (the blocking
/// client owns its own runtime); tool calls build one per invocation inside
/// `spawn_blocking`.
pub struct ReqwestBackend {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ReqwestBackend {
    pub fn new(config: &ApiConfig) -> Result<Self, RegistrarError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RegistrarError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl HttpBackend for ReqwestBackend {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    fn send(&self, token: &Credential, request: &ApiRequest) -> Result<ApiResponse, RegistrarError> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .bearer_auth(token.expose())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, concat!("dnsimple-mcp/", env!("CARGO_PKG_VERSION")));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                RegistrarError::transport("Request timed out")
            } else if e.is_connect() {
                RegistrarError::transport(format!("Connection failed: {e}"))
            } else {
                RegistrarError::transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| RegistrarError::transport(format!("Failed to read response body: {e}")))?;

        debug!(status, bytes = body.len(), "API response received");

        Ok(ApiResponse { status, body })
    }
}

/// A backend bound to the credential of the current invocation.
pub struct ApiClient<'a> {
    backend: &'a dyn HttpBackend,
    token: Credential,
}

impl<'a> ApiClient<'a> {
    pub fn new(backend: &'a dyn HttpBackend, token: Credential) -> Self {
        Self { backend, token }
    }

    pub fn send(&self, request: ApiRequest) -> Result<ApiResponse, RegistrarError> {
        self.backend.send(&self.token, &request)
    }

    pub fn get(&self, path: impl Into<String>) -> Result<ApiResponse, RegistrarError> {
        self.send(ApiRequest::new(Method::GET, path))
    }

    pub fn post(&self, path: impl Into<String>, body: Value) -> Result<ApiResponse, RegistrarError> {
        self.send(ApiRequest::new(Method::POST, path).json(body))
    }

    pub fn patch(&self, path: impl Into<String>, body: Value) -> Result<ApiResponse, RegistrarError> {
        self.send(ApiRequest::new(Method::PATCH, path).json(body))
    }

    pub fn put(&self, path: impl Into<String>) -> Result<ApiResponse, RegistrarError> {
        self.send(ApiRequest::new(Method::PUT, path))
    }

    pub fn delete(&self, path: impl Into<String>) -> Result<ApiResponse, RegistrarError> {
        self.send(ApiRequest::new(Method::DELETE, path))
    }
}

/// Render an API id (integer or string) as a string.
pub fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
