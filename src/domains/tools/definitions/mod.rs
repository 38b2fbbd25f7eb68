//! Tool definitions module.
//!
//! One file per tool, grouped by the API area they touch:
//!
//! - `domains/` - account domains, pricing, auto-renew, transfers
//! - `dns/` - zone record listing, upsert and deletion
//! - `whois/` - whois privacy status and purchase

pub mod common;
pub mod dns;
pub mod domains;
pub mod whois;

pub use dns::{
    ConfigureDnsRecordParams, ConfigureDnsRecordTool, DeleteDnsRecordParams, DeleteDnsRecordTool,
    ListDnsRecordsParams, ListDnsRecordsTool, RecordType,
};
pub use domains::{
    DisableAutorenewParams, DisableAutorenewTool, DomainCostsParams, DomainCostsTool,
    ListDomainsParams, ListDomainsTool, RenewalCostsParams, RenewalCostsTool,
    TransferDomainParams, TransferDomainTool,
};
pub use whois::{
    EnableWhoisPrivacyParams, EnableWhoisPrivacyTool, GetWhoisPrivacyParams, GetWhoisPrivacyTool,
};
