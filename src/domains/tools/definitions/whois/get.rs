use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error, instrument};

use super::{is_enabled, whois_path};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::tool_model;
use crate::domains::tools::envelope::Envelope;

/// Reported when the registrar has no privacy service for the domain.
pub const NOT_PURCHASED_MESSAGE: &str =
    "Whois privacy not purchased or not available for this domain";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetWhoisPrivacyParams {
    /// Domain name (e.g., 'example.com')
    pub domain_name: String,
}

pub struct GetWhoisPrivacyTool;

impl GetWhoisPrivacyTool {
    pub const NAME: &'static str = "get_whois_privacy";

    pub const DESCRIPTION: &'static str = "Get whois privacy status for a domain.";

    /// A 404 means privacy was never purchased and is reported as `enabled: false`.
    #[instrument(skip_all, fields(domain = %params.domain_name))]
    pub fn execute(params: &GetWhoisPrivacyParams, ctx: &ToolContext<'_>) -> Envelope {
        let domain = &params.domain_name;

        let response = match ctx.client.get(ctx.path(&whois_path(domain))) {
            Ok(response) => response,
            Err(e) => {
                error!("Whois privacy lookup failed: {}", e);
                return Envelope::error(format!("Failed to get whois privacy: {e}"));
            }
        };

        match response.status {
            200 => {
                let whois = response
                    .data()
                    .filter(|d| !d.is_null())
                    .unwrap_or_else(|| json!({}));
                Envelope::success(json!({
                    "domain": domain,
                    "enabled": is_enabled(&whois),
                    "expires_on": whois.get("expires_on").cloned().unwrap_or(Value::Null),
                    "whois_privacy": whois,
                }))
            }
            404 => {
                debug!("Whois privacy not purchased");
                Envelope::success(json!({
                    "domain": domain,
                    "enabled": false,
                    "message": NOT_PURCHASED_MESSAGE,
                }))
            }
            status => {
                error!(status, "Whois privacy lookup rejected");
                Envelope::error(format!("Failed to get whois privacy status: {status}"))
                    .with("message", response.error_message())
            }
        }
    }

    pub fn to_tool() -> Tool {
        tool_model(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<GetWhoisPrivacyParams>(),
        )
    }
}
