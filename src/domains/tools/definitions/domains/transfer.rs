//! Inbound domain transfer initiation.

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info, instrument};

use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{opt_string_or_number, tool_model};
use crate::domains::tools::envelope::Envelope;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TransferDomainParams {
    /// Domain name to transfer
    pub domain_name: String,

    /// Authorization code (EPP code) from current registrar
    pub auth_code: String,

    /// Registrant ID (optional, uses account default if not provided)
    #[serde(default, deserialize_with = "opt_string_or_number")]
    #[schemars(with = "Option<String>")]
    pub registrant_id: Option<String>,
}

pub struct TransferDomainTool;

impl TransferDomainTool {
    pub const NAME: &'static str = "transfer_domain";

    pub const DESCRIPTION: &'static str = "Initiate a domain transfer to DNSimple. Requires authorization code from current registrar.";

    #[instrument(skip_all, fields(domain = %params.domain_name))]
    pub fn execute(params: &TransferDomainParams, ctx: &ToolContext<'_>) -> Envelope {
        let path = ctx.path(&format!(
            "/registrar/domains/{}/transfers",
            params.domain_name
        ));

        let response = match ctx.client.post(path, transfer_body(params)) {
            Ok(response) => response,
            Err(e) => {
                error!("Transfer request failed: {}", e);
                return Envelope::error(format!("Failed to initiate transfer: {e}"));
            }
        };

        if response.is_status(&[200, 201]) {
            info!("Transfer initiated");
            Envelope::success(json!({
                "success": true,
                "transfer": response.data().unwrap_or(Value::Null),
            }))
        } else {
            error!(status = response.status, "Transfer rejected");
            Envelope::error(format!("Failed to initiate transfer: {}", response.status))
                .with("message", response.error_message())
        }
    }

    pub fn to_tool() -> Tool {
        tool_model(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<TransferDomainParams>(),
        )
    }
}

/// Request body; an empty registrant id is left out so the account default applies.
fn transfer_body(params: &TransferDomainParams) -> Value {
    let mut body = json!({ "auth_code": params.auth_code });
    if let Some(registrant_id) = params.registrant_id.as_deref().filter(|id| !id.is_empty()) {
        body["registrant_id"] = json!(registrant_id);
    }
    body
}
