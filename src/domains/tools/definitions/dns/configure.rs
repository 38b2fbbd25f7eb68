//! Create-or-update of a zone record keyed by name and type.
//!
//! Only `(name, type)` decides whether a record already exists; the first
//! match is overwritten regardless of its current content.

use reqwest::Method;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info, instrument};

use super::RecordType;
use crate::domains::registrar::client::id_to_string;
use crate::domains::registrar::{ApiRequest, RegistrarError};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{default_ttl, tool_model};
use crate::domains::tools::envelope::Envelope;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConfigureDnsRecordParams {
    /// Domain name (e.g., 'example.com')
    pub domain_name: String,

    /// Record name (e.g., 'www' or '@' for root domain)
    pub name: String,

    /// DNS record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Record content (IP address for A/AAAA, hostname for CNAME, etc.)
    pub content: String,

    /// TTL in seconds (default: 3600)
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Priority for MX records (optional)
    #[serde(default)]
    pub priority: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpsertAction {
    Created,
    Updated,
}

impl UpsertAction {
    fn as_str(self) -> &'static str {
        match self {
            UpsertAction::Created => "created",
            UpsertAction::Updated => "updated",
        }
    }
}

pub struct ConfigureDnsRecordTool;

impl ConfigureDnsRecordTool {
    pub const NAME: &'static str = "configure_dns_record";

    pub const DESCRIPTION: &'static str = "Create or update a DNS record. If a record with the same name and type exists, it will be updated.";

    #[instrument(skip_all, fields(domain = %params.domain_name, name = %params.name, record_type = %params.record_type))]
    pub fn execute(params: &ConfigureDnsRecordParams, ctx: &ToolContext<'_>) -> Envelope {
        let records_path = ctx.path(&format!("/zones/{}/records", params.domain_name));

        let existing = match find_existing(ctx, &records_path, params) {
            Ok(existing) => existing,
            Err(e) => {
                error!("Existing record lookup failed: {}", e);
                return Envelope::error(format!("Failed to look up existing DNS records: {e}"));
            }
        };

        let body = record_body(params);
        let (action, result) = match existing {
            Some(record_id) => (
                UpsertAction::Updated,
                ctx.client.patch(format!("{records_path}/{record_id}"), body),
            ),
            None => (UpsertAction::Created, ctx.client.post(records_path, body)),
        };

        match result {
            Ok(response) if response.is_status(&[200, 201]) => {
                info!("DNS record {}", action.as_str());
                Envelope::success(json!({
                    "success": true,
                    "action": action.as_str(),
                    "record": response.data().unwrap_or(Value::Null),
                }))
            }
            Ok(response) => {
                error!(status = response.status, "DNS record {} rejected", action.as_str());
                Envelope::error(format!(
                    "Failed to {} DNS record: {}",
                    action.as_str(),
                    response.status
                ))
                .with("response", response.body)
            }
            Err(e) => {
                error!("DNS record request failed: {}", e);
                Envelope::error(format!("Failed to {} DNS record: {e}", action.as_str()))
            }
        }
    }

    pub fn to_tool() -> Tool {
        tool_model(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<ConfigureDnsRecordParams>(),
        )
    }
}

/// Id of the first record with the same name and type, if any.
fn find_existing(
    ctx: &ToolContext<'_>,
    records_path: &str,
    params: &ConfigureDnsRecordParams,
) -> Result<Option<String>, RegistrarError> {
    let request = ApiRequest::new(Method::GET, records_path)
        .query("name", &params.name)
        .query("type", params.record_type);

    let response = ctx.client.send(request)?.error_for_status()?;

    let Some(Value::Array(records)) = response.data() else {
        return Ok(None);
    };

    match records.first() {
        None => Ok(None),
        Some(record) => record
            .get("id")
            .and_then(id_to_string)
            .map(Some)
            .ok_or_else(|| RegistrarError::malformed("existing record has no id")),
    }
}

fn record_body(params: &ConfigureDnsRecordParams) -> Value {
    let mut body = json!({
        "name": params.name,
        "type": params.record_type,
        "content": params.content,
        "ttl": params.ttl,
    });
    if let Some(priority) = params.priority {
        body["priority"] = json!(priority);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registrar::testing::FakeRegistrar;
    use crate::domains::tools::context::test_context;

    fn params(name: &str, record_type: RecordType, content: &str) -> ConfigureDnsRecordParams {
        ConfigureDnsRecordParams {
            domain_name: "example.com".to_string(),
            name: name.to_string(),
            record_type,
            content: content.to_string(),
            ttl: default_ttl(),
            priority: None,
        }
    }

    #[test]
    fn test_create_then_update_same_record() {
        let fake = FakeRegistrar::new();
        let ctx = test_context(&fake);

        let first = ConfigureDnsRecordTool::execute(&params("www", RecordType::A, "1.2.3.4"), &ctx)
            .into_value();
        assert_eq!(first["success"], true);
        assert_eq!(first["action"], "created");
        let id = first["record"]["id"].clone();

        let second =
            ConfigureDnsRecordTool::execute(&params("www", RecordType::A, "5.6.7.8"), &ctx)
                .into_value();
        assert_eq!(second["action"], "updated");
        assert_eq!(second["record"]["id"], id);
        assert_eq!(second["record"]["content"], "5.6.7.8");

        let records = fake.records("example.com");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["content"], "5.6.7.8");
    }

    #[test]
    fn test_different_type_creates_new_record() {
        let fake = FakeRegistrar::new();
        fake.add_record("example.com", json!({"name": "www", "type": "A", "content": "1.2.3.4"}));
        let ctx = test_context(&fake);

        let value =
            ConfigureDnsRecordTool::execute(&params("www", RecordType::Aaaa, "::1"), &ctx)
                .into_value();

        assert_eq!(value["action"], "created");
        assert_eq!(fake.records("example.com").len(), 2);
    }

    #[test]
    fn test_lookup_sends_name_and_type_filters() {
        let fake = FakeRegistrar::new();
        let ctx = test_context(&fake);

        ConfigureDnsRecordTool::execute(&params("@", RecordType::Txt, "v=spf1 -all"), &ctx);

        let requests = fake.requests();
        let lookup = requests.iter().find(|r| r.method == Method::GET).unwrap();
        assert_eq!(lookup.query_param("name"), Some("@"));
        assert_eq!(lookup.query_param("type"), Some("TXT"));
    }

    #[test]
    fn test_priority_and_ttl_in_body() {
        let mut mx = params("@", RecordType::Mx, "mail.example.com");
        mx.ttl = 600;
        mx.priority = Some(10);

        assert_eq!(
            record_body(&mx),
            json!({"name": "@", "type": "MX", "content": "mail.example.com", "ttl": 600, "priority": 10})
        );
        assert!(record_body(&params("@", RecordType::A, "1.1.1.1")).get("priority").is_none());
    }

    #[test]
    fn test_rejected_create_carries_raw_body() {
        let fake = FakeRegistrar::new();
        fake.respond(
            Method::POST,
            "/1010/zones/example.com/records",
            400,
            json!({"message": "Validation failed"}),
        );
        let ctx = test_context(&fake);

        let envelope =
            ConfigureDnsRecordTool::execute(&params("www", RecordType::Cname, "x"), &ctx);

        assert!(envelope.is_error());
        assert_eq!(envelope.as_value()["error"], "Failed to created DNS record: 400");
        assert_eq!(
            envelope.as_value()["response"],
            r#"{"message":"Validation failed"}"#
        );
    }

    #[test]
    fn test_failed_lookup_does_not_create() {
        let fake = FakeRegistrar::new();
        fake.respond(
            Method::GET,
            "/1010/zones/example.com/records",
            500,
            json!({"message": "down"}),
        );
        let ctx = test_context(&fake);

        let envelope = ConfigureDnsRecordTool::execute(&params("www", RecordType::A, "1.2.3.4"), &ctx);

        assert!(envelope.is_error());
        assert_eq!(fake.count(&Method::POST, "/1010/zones/example.com/records"), 0);
    }
}
