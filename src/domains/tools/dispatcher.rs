//! The common prologue of every tool call.
//!
//! parse arguments -> resolve credential -> resolve account -> run handler.
//! Each step that fails ends the call with an error envelope; nothing past
//! this point is allowed to surface as a protocol fault.

use rmcp::model::JsonObject;
use tracing::{debug, error, info_span, warn};

use super::context::ToolContext;
use super::envelope::Envelope;
use super::request::ToolRequest;
use crate::domains::registrar::{ApiClient, CredentialResolver, HttpBackend, resolve_account};

pub struct Dispatcher<'a> {
    credentials: &'a CredentialResolver,
    backend: &'a dyn HttpBackend,
    max_pages: u32,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        credentials: &'a CredentialResolver,
        backend: &'a dyn HttpBackend,
        max_pages: u32,
    ) -> Self {
        Self {
            credentials,
            backend,
            max_pages,
        }
    }

    /// Run one tool call to completion, always producing exactly one envelope.
    pub fn dispatch(&self, name: &str, arguments: JsonObject) -> Envelope {
        let span = info_span!("tool_call", tool = name);
        let _enter = span.enter();

        let request = match ToolRequest::parse(name, arguments) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected tool call: {}", e);
                return e.into();
            }
        };

        let Some(token) = self.credentials.resolve() else {
            warn!("No API token available");
            return Envelope::error(self.missing_credential_message());
        };

        let client = ApiClient::new(self.backend, token);
        let account_id = match resolve_account(&client) {
            Ok(id) => id,
            Err(e) => {
                error!("Account resolution failed: {}", e);
                return Envelope::error(format!("Failed to get account ID: {e}"));
            }
        };
        debug!(account_id = %account_id, "Account resolved");

        let ctx = ToolContext::new(client, account_id, self.max_pages);
        request.execute(&ctx)
    }

    fn missing_credential_message(&self) -> String {
        let file = self
            .credentials
            .env_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "the credential file".to_string());

        format!(
            "DNSimple API token not found. Set {} environment variable, add it to {}, or configure a secret helper.",
            self.credentials.token_var(),
            file
        )
    }
}
