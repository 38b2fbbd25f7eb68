//! Registration and renewal pricing per domain.

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

use super::pricing::{domain_names_or_all, fetch_registrar_domain, fetch_tld_prices, tld_of};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::tool_model;
use crate::domains::tools::envelope::Envelope;

/// Parameters for the domain pricing tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct DomainCostsParams {
    /// List of domain names to get pricing for. If empty, returns pricing for all domains in account.
    #[serde(default)]
    pub domain_names: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct DomainCosts {
    account_id: String,
    domains: Vec<DomainPricing>,
}

#[derive(Debug, Serialize)]
struct DomainPricing {
    domain: String,
    domain_info: Option<Value>,
    prices: Vec<Value>,
}

pub struct DomainCostsTool;

impl DomainCostsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_domain_costs";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get pricing information for domains. Returns registration and renewal costs.";

    #[instrument(skip_all, fields(account_id = %ctx.account_id))]
    pub fn execute(params: &DomainCostsParams, ctx: &ToolContext<'_>) -> Envelope {
        let names = match domain_names_or_all(ctx, params.domain_names.as_deref()) {
            Ok(names) => names,
            Err(e) => {
                error!("Failed to list domains: {}", e);
                return Envelope::error(format!("Failed to list domains: {e}"));
            }
        };

        info!("Fetching pricing for {} domains", names.len());

        let domains = names
            .into_iter()
            .map(|domain| {
                let prices = fetch_tld_prices(ctx, tld_of(&domain));
                let domain_info = fetch_registrar_domain(ctx, &domain);
                DomainPricing {
                    domain,
                    domain_info,
                    prices,
                }
            })
            .collect();

        Envelope::from_serialize(&DomainCosts {
            account_id: ctx.account_id.to_string(),
            domains,
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<DomainCostsParams>(),
        )
    }
}
