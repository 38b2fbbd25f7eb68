//! Tool Registry - central catalog and dispatch for all tools.
//!
//! This module provides:
//! - The catalog of available tools (names, descriptions, input schemas)
//! - Tool execution through the [`Dispatcher`] for every transport

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use tracing::error;

use crate::core::config::Config;
use crate::domains::registrar::{CredentialResolver, ReqwestBackend};

use super::definitions::{
    ConfigureDnsRecordTool, DeleteDnsRecordTool, DisableAutorenewTool, DomainCostsTool,
    EnableWhoisPrivacyTool, GetWhoisPrivacyTool, ListDnsRecordsTool, ListDomainsTool,
    RenewalCostsTool, TransferDomainTool,
};
use super::dispatcher::Dispatcher;
use super::envelope::Envelope;

/// Tool registry - owns the credential sources and runs tool calls.
pub struct ToolRegistry {
    config: Arc<Config>,
    credentials: CredentialResolver,
}

impl ToolRegistry {
    /// Create a registry, probing for the secret helper once.
    pub fn new(config: Arc<Config>) -> Self {
        let credentials = CredentialResolver::from_config(&config.credentials);
        Self::with_resolver(config, credentials)
    }

    pub fn with_resolver(config: Arc<Config>, credentials: CredentialResolver) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            DomainCostsTool::NAME,
            RenewalCostsTool::NAME,
            ConfigureDnsRecordTool::NAME,
            ListDnsRecordsTool::NAME,
            DeleteDnsRecordTool::NAME,
            DisableAutorenewTool::NAME,
            TransferDomainTool::NAME,
            ListDomainsTool::NAME,
            GetWhoisPrivacyTool::NAME,
            EnableWhoisPrivacyTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for the catalog; every transport
    /// lists tools from here.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            DomainCostsTool::to_tool(),
            RenewalCostsTool::to_tool(),
            ConfigureDnsRecordTool::to_tool(),
            ListDnsRecordsTool::to_tool(),
            DeleteDnsRecordTool::to_tool(),
            DisableAutorenewTool::to_tool(),
            TransferDomainTool::to_tool(),
            ListDomainsTool::to_tool(),
            GetWhoisPrivacyTool::to_tool(),
            EnableWhoisPrivacyTool::to_tool(),
        ]
    }

    /// Run a tool call to completion.
    ///
    /// Blocking: performs synchronous HTTP and must run outside the async
    /// runtime (see `spawn_blocking` in the server handler).
    pub fn call_tool(&self, name: &str, arguments: JsonObject) -> Envelope {
        let backend = match ReqwestBackend::new(&self.config.api) {
            Ok(backend) => backend,
            Err(e) => {
                error!("Failed to build HTTP client: {}", e);
                return Envelope::error(format!("Failed to create HTTP client: {e}"));
            }
        };

        Dispatcher::new(&self.credentials, &backend, self.config.api.max_pages)
            .dispatch(name, arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registrar::NoSecretSource;
    use std::collections::HashSet;

    fn test_registry(token_var: &str) -> ToolRegistry {
        let resolver = CredentialResolver::new(token_var, None, Arc::new(NoSecretSource));
        ToolRegistry::with_resolver(Arc::new(Config::default()), resolver)
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = test_registry("DNSIMPLE_MCP_TEST_REGISTRY_NAMES");
        let names = registry.tool_names();
        assert_eq!(names.len(), 10);
        assert!(names.contains(&"get_domain_costs"));
        assert!(names.contains(&"get_renewal_costs"));
        assert!(names.contains(&"configure_dns_record"));
        assert!(names.contains(&"list_dns_records"));
        assert!(names.contains(&"delete_dns_record"));
        assert!(names.contains(&"disable_autorenew"));
        assert!(names.contains(&"transfer_domain"));
        assert!(names.contains(&"list_domains"));
        assert!(names.contains(&"get_whois_privacy"));
        assert!(names.contains(&"enable_whois_privacy"));
    }

    #[test]
    fn test_catalog_matches_names() {
        let registry = test_registry("DNSIMPLE_MCP_TEST_REGISTRY_CATALOG");
        let catalog: HashSet<String> = ToolRegistry::get_all_tools()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        let names: HashSet<String> = registry.tool_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(catalog, names);
    }

    #[test]
    fn test_configure_schema_lists_record_types() {
        let tool = ToolRegistry::get_all_tools()
            .into_iter()
            .find(|t| t.name == "configure_dns_record")
            .unwrap();
        let schema = serde_json::Value::Object((*tool.input_schema).clone()).to_string();

        for record_type in ["A", "AAAA", "CNAME", "MX", "TXT", "NS", "SRV", "ALIAS"] {
            assert!(schema.contains(&format!("\"{record_type}\"")));
        }
        assert!(schema.contains("domain_name"));
        assert!(schema.contains("\"type\""));
    }

    #[test]
    fn test_unknown_tool_without_network() {
        let registry = test_registry("DNSIMPLE_MCP_TEST_REGISTRY_UNKNOWN");
        let envelope = registry.call_tool("unknown", JsonObject::new());
        assert_eq!(envelope.as_value()["error"], "Unknown tool: unknown");
    }

    #[test]
    fn test_missing_token_without_network() {
        let registry = test_registry("DNSIMPLE_MCP_TEST_REGISTRY_NO_TOKEN");
        let envelope = registry.call_tool("list_domains", JsonObject::new());
        assert!(
            envelope.as_value()["error"]
                .as_str()
                .unwrap()
                .starts_with("DNSimple API token not found.")
        );
    }
}
