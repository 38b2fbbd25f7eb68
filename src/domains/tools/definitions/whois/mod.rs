//! Whois privacy tools.

pub mod enable;
pub mod get;

use serde_json::Value;

pub use enable::{EnableWhoisPrivacyParams, EnableWhoisPrivacyTool};
pub use get::{GetWhoisPrivacyParams, GetWhoisPrivacyTool};

/// Registrar path of the whois privacy resource of `domain`.
fn whois_path(domain: &str) -> String {
    format!("/registrar/domains/{domain}/whois_privacy")
}

/// `enabled` flag of a whois privacy payload, false when absent.
fn is_enabled(whois: &Value) -> bool {
    whois.get("enabled").and_then(Value::as_bool).unwrap_or(false)
}
