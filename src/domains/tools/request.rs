//! Typed tool invocations.
//!
//! A call arrives as a tool name plus a loose JSON argument object. It is
//! turned into a [`ToolRequest`] before any credential or network work so
//! that unknown tools and malformed arguments never reach the API.

use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::context::ToolContext;
use super::definitions::{
    ConfigureDnsRecordParams, ConfigureDnsRecordTool, DeleteDnsRecordParams, DeleteDnsRecordTool,
    DisableAutorenewParams, DisableAutorenewTool, DomainCostsParams, DomainCostsTool,
    EnableWhoisPrivacyParams, EnableWhoisPrivacyTool, GetWhoisPrivacyParams, GetWhoisPrivacyTool,
    ListDnsRecordsParams, ListDnsRecordsTool, ListDomainsParams, ListDomainsTool,
    RenewalCostsParams, RenewalCostsTool, TransferDomainParams, TransferDomainTool,
};
use super::envelope::Envelope;
use super::error::ToolError;

#[derive(Debug, Clone)]
pub enum ToolRequest {
    DomainCosts(DomainCostsParams),
    RenewalCosts(RenewalCostsParams),
    ConfigureDnsRecord(ConfigureDnsRecordParams),
    ListDnsRecords(ListDnsRecordsParams),
    DeleteDnsRecord(DeleteDnsRecordParams),
    DisableAutorenew(DisableAutorenewParams),
    TransferDomain(TransferDomainParams),
    ListDomains(ListDomainsParams),
    GetWhoisPrivacy(GetWhoisPrivacyParams),
    EnableWhoisPrivacy(EnableWhoisPrivacyParams),
}

impl ToolRequest {
    /// Resolve `name` and decode `arguments` into that tool's parameters.
    pub fn parse(name: &str, arguments: JsonObject) -> Result<Self, ToolError> {
        let request = match name {
            DomainCostsTool::NAME => Self::DomainCosts(params(name, arguments)?),
            RenewalCostsTool::NAME => Self::RenewalCosts(params(name, arguments)?),
            ConfigureDnsRecordTool::NAME => Self::ConfigureDnsRecord(params(name, arguments)?),
            ListDnsRecordsTool::NAME => Self::ListDnsRecords(params(name, arguments)?),
            DeleteDnsRecordTool::NAME => Self::DeleteDnsRecord(params(name, arguments)?),
            DisableAutorenewTool::NAME => Self::DisableAutorenew(params(name, arguments)?),
            TransferDomainTool::NAME => Self::TransferDomain(params(name, arguments)?),
            ListDomainsTool::NAME => Self::ListDomains(params(name, arguments)?),
            GetWhoisPrivacyTool::NAME => Self::GetWhoisPrivacy(params(name, arguments)?),
            EnableWhoisPrivacyTool::NAME => Self::EnableWhoisPrivacy(params(name, arguments)?),
            _ => return Err(ToolError::not_found(name)),
        };
        Ok(request)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DomainCosts(_) => DomainCostsTool::NAME,
            Self::RenewalCosts(_) => RenewalCostsTool::NAME,
            Self::ConfigureDnsRecord(_) => ConfigureDnsRecordTool::NAME,
            Self::ListDnsRecords(_) => ListDnsRecordsTool::NAME,
            Self::DeleteDnsRecord(_) => DeleteDnsRecordTool::NAME,
            Self::DisableAutorenew(_) => DisableAutorenewTool::NAME,
            Self::TransferDomain(_) => TransferDomainTool::NAME,
            Self::ListDomains(_) => ListDomainsTool::NAME,
            Self::GetWhoisPrivacy(_) => GetWhoisPrivacyTool::NAME,
            Self::EnableWhoisPrivacy(_) => EnableWhoisPrivacyTool::NAME,
        }
    }

    /// Run the handler against an account-bound context.
    pub fn execute(&self, ctx: &ToolContext<'_>) -> Envelope {
        match self {
            Self::DomainCosts(p) => DomainCostsTool::execute(p, ctx),
            Self::RenewalCosts(p) => RenewalCostsTool::execute(p, ctx),
            Self::ConfigureDnsRecord(p) => ConfigureDnsRecordTool::execute(p, ctx),
            Self::ListDnsRecords(p) => ListDnsRecordsTool::execute(p, ctx),
            Self::DeleteDnsRecord(p) => DeleteDnsRecordTool::execute(p, ctx),
            Self::DisableAutorenew(p) => DisableAutorenewTool::execute(p, ctx),
            Self::TransferDomain(p) => TransferDomainTool::execute(p, ctx),
            Self::ListDomains(p) => ListDomainsTool::execute(p, ctx),
            Self::GetWhoisPrivacy(p) => GetWhoisPrivacyTool::execute(p, ctx),
            Self::EnableWhoisPrivacy(p) => EnableWhoisPrivacyTool::execute(p, ctx),
        }
    }
}

fn params<T: DeserializeOwned>(tool: &str, arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(tool, e.to_string()))
}
