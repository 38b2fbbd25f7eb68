//! Batch auto-renew disabling.
//!
//! Each domain is patched independently; one failure never aborts the batch.

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::tool_model;
use crate::domains::tools::envelope::Envelope;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DisableAutorenewParams {
    /// List of domain names to disable auto-renewal for
    pub domain_names: Vec<String>,
}

/// Outcome for one domain of the batch.
#[derive(Debug, Serialize)]
struct AutorenewOutcome {
    domain: String,
    status: &'static str,
    error: Option<String>,
}

pub struct DisableAutorenewTool;

impl DisableAutorenewTool {
    pub const NAME: &'static str = "disable_autorenew";

    pub const DESCRIPTION: &'static str = "Disable auto-renewal for one or more domains.";

    /// Patch every domain independently; failures are recorded per domain.
    #[instrument(skip_all, fields(count = params.domain_names.len()))]
    pub fn execute(params: &DisableAutorenewParams, ctx: &ToolContext<'_>) -> Envelope {
        let results: Vec<AutorenewOutcome> = params
            .domain_names
            .iter()
            .map(|domain| disable_one(ctx, domain))
            .collect();

        let failed = results.iter().filter(|r| r.error.is_some()).count();
        info!(
            "Auto-renew disabled for {} of {} domains",
            results.len() - failed,
            results.len()
        );

        Envelope::success(json!({ "results": results }))
    }

    pub fn to_tool() -> Tool {
        tool_model(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<DisableAutorenewParams>(),
        )
    }
}

fn disable_one(ctx: &ToolContext<'_>, domain: &str) -> AutorenewOutcome {
    let path = ctx.path(&format!("/registrar/domains/{domain}"));
    let error = match ctx.client.patch(path, json!({ "auto_renew": false })) {
        Ok(response) if response.is_status(&[200]) => None,
        Ok(response) => Some(format!("API Error {}: {}", response.status, response.body)),
        Err(e) => Some(e.to_string()),
    };

    match error {
        None => AutorenewOutcome {
            domain: domain.to_string(),
            status: "disabled",
            error: None,
        },
        Some(error) => {
            warn!(domain, "Failed to disable auto-renew: {}", error);
            AutorenewOutcome {
                domain: domain.to_string(),
                status: "failed",
                error: Some(error),
            }
        }
    }
}
