//! DNS record listing with optional name and type filters.

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};

use crate::domains::registrar::fetch_all_pages;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::tool_model;
use crate::domains::tools::envelope::Envelope;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListDnsRecordsParams {
    /// Domain name (e.g., 'example.com')
    pub domain_name: String,

    /// Filter by record name (optional)
    #[serde(default)]
    pub name: Option<String>,

    /// Filter by record type (optional)
    #[serde(default, rename = "type")]
    pub record_type: Option<String>,
}

impl ListDnsRecordsParams {
    /// Non-empty filters, attached to every page request.
    fn filters(&self) -> Vec<(&'static str, String)> {
        [("name", &self.name), ("type", &self.record_type)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.clone()))
            })
            .collect()
    }
}

pub struct ListDnsRecordsTool;

impl ListDnsRecordsTool {
    pub const NAME: &'static str = "list_dns_records";

    pub const DESCRIPTION: &'static str = "List DNS records for a domain.";

    #[instrument(skip_all, fields(domain = %params.domain_name))]
    pub fn execute(params: &ListDnsRecordsParams, ctx: &ToolContext<'_>) -> Envelope {
        let path = ctx.path(&format!("/zones/{}/records", params.domain_name));

        match fetch_all_pages(&ctx.client, &path, &params.filters(), ctx.max_pages) {
            Ok(records) => {
                info!("Listed {} DNS records", records.len());
                Envelope::success(json!({
                    "domain": params.domain_name,
                    "count": records.len(),
                    "records": records,
                }))
            }
            Err(e) => {
                error!("Failed to list DNS records: {}", e);
                Envelope::error(format!("Failed to list DNS records: {e}"))
            }
        }
    }

    pub fn to_tool() -> Tool {
        tool_model(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<ListDnsRecordsParams>(),
        )
    }
}
