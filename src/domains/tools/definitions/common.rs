//! Helpers shared across tool definitions.

use rmcp::model::Tool;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Build the catalog entry for a tool from its name, description and schema.
pub fn tool_model(
    name: &'static str,
    description: &'static str,
    input_schema: std::sync::Arc<rmcp::model::JsonObject>,
) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema,
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Accept an id given either as a JSON string or an integer.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or integer id, got {other}"
        ))),
    }
}

/// Optional variant of [`string_or_number`]; `null` maps to `None`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or integer id, got {other}"
        ))),
    }
}

/// Default TTL for DNS records, in seconds.
pub fn default_ttl() -> u32 {
    3600
}
