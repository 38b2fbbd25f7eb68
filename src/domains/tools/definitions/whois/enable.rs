//! Purchase and enable whois privacy, skipping the purchase when already on.

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};

use super::{is_enabled, whois_path};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::tool_model;
use crate::domains::tools::envelope::Envelope;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EnableWhoisPrivacyParams {
    /// Domain name (e.g., 'example.com')
    pub domain_name: String,
}

pub struct EnableWhoisPrivacyTool;

impl EnableWhoisPrivacyTool {
    pub const NAME: &'static str = "enable_whois_privacy";

    pub const DESCRIPTION: &'static str = "Enable whois privacy (domain privacy) for a domain. This will purchase and enable whois privacy if not already enabled.";

    #[instrument(skip_all, fields(domain = %params.domain_name))]
    pub fn execute(params: &EnableWhoisPrivacyParams, ctx: &ToolContext<'_>) -> Envelope {
        let domain = &params.domain_name;
        let path = ctx.path(&whois_path(domain));

        // Any status other than 200 falls through to the purchase call.
        match ctx.client.get(path.as_str()) {
            Ok(response) if response.is_status(&[200]) => {
                if let Some(whois) = response.data().filter(is_enabled) {
                    info!("Whois privacy already enabled");
                    return Envelope::success(json!({
                        "domain": domain,
                        "status": "already_enabled",
                        "message": "Whois privacy is already enabled for this domain",
                        "whois_privacy": whois,
                    }));
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!("Whois privacy lookup failed: {}", e);
                return Envelope::error(format!("Failed to enable whois privacy: {e}"));
            }
        }

        let response = match ctx.client.put(path) {
            Ok(response) => response,
            Err(e) => {
                error!("Whois privacy purchase failed: {}", e);
                return Envelope::error(format!("Failed to enable whois privacy: {e}"));
            }
        };

        if response.is_status(&[200, 201]) {
            info!("Whois privacy enabled");
            Envelope::success(json!({
                "success": true,
                "domain": domain,
                "status": "enabled",
                "message": "Whois privacy has been enabled for this domain",
                "whois_privacy": response.data().unwrap_or_else(|| json!({})),
            }))
        } else {
            error!(status = response.status, "Whois privacy purchase rejected");
            Envelope::error(format!("Failed to enable whois privacy: {}", response.status))
                .with("message", response.error_message())
        }
    }

    pub fn to_tool() -> Tool {
        tool_model(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<EnableWhoisPrivacyParams>(),
        )
    }
}
