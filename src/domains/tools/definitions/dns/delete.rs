//! DNS record deletion by id.

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};

use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{string_or_number, tool_model};
use crate::domains::tools::envelope::Envelope;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteDnsRecordParams {
    /// Domain name (e.g., 'example.com')
    pub domain_name: String,

    /// DNS record ID to delete
    #[serde(deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub record_id: String,
}

pub struct DeleteDnsRecordTool;

impl DeleteDnsRecordTool {
    pub const NAME: &'static str = "delete_dns_record";

    pub const DESCRIPTION: &'static str = "Delete a DNS record by ID.";

    #[instrument(skip_all, fields(domain = %params.domain_name, record_id = %params.record_id))]
    pub fn execute(params: &DeleteDnsRecordParams, ctx: &ToolContext<'_>) -> Envelope {
        let path = ctx.path(&format!(
            "/zones/{}/records/{}",
            params.domain_name, params.record_id
        ));

        match ctx.client.delete(path) {
            Ok(response) if response.is_status(&[200, 204]) => {
                info!("DNS record deleted");
                Envelope::success(json!({
                    "success": true,
                    "message": format!("DNS record {} deleted", params.record_id),
                }))
            }
            Ok(response) => {
                error!(status = response.status, "DNS record deletion rejected");
                Envelope::error(format!("Failed to delete DNS record: {}", response.status))
                    .with("response", response.body)
            }
            Err(e) => {
                error!("DNS record deletion failed: {}", e);
                Envelope::error(format!("Failed to delete DNS record: {e}"))
            }
        }
    }

    pub fn to_tool() -> Tool {
        tool_model(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<DeleteDnsRecordParams>(),
        )
    }
}
