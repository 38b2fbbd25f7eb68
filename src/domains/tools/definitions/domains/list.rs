//! List every domain in the account.

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

/// `list_domains` takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListDomainsParams {}

pub struct ListDomainsTool;

impl ListDomainsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_domains";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all domains in the DNSimple account.";

    #[instrument(skip_all, fields(account_id = %ctx.account_id))]
    pub fn execute(_params: &ListDomainsParams, ctx: &ToolContext<'_>) -> Envelope {
        match fetch_all_pages(&ctx.client, &ctx.path("/domains"), &[], ctx.max_pages) {
            Ok(domains) => {
                info!("Listed {} domains", domains.len());
                Envelope::success(json!({
                    "account_id": ctx.account_id.as_str(),
                    "count": domains.len(),
                    "domains": domains,
                }))
            }
            Err(e) => {
                error!("Failed to list domains: {}", e);
                Envelope::error(format!("Failed to list domains: {e}"))
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<ListDomainsParams>(),
        )
    }
}
