//! DNS zone record tools.

pub mod configure;
pub mod delete;
pub mod list;

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use configure::{ConfigureDnsRecordParams, ConfigureDnsRecordTool};
pub use delete::{DeleteDnsRecordParams, DeleteDnsRecordTool};
pub use list::{ListDnsRecordsParams, ListDnsRecordsTool};

/// Record types accepted by `configure_dns_record`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
    Srv,
    Alias,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Txt => "TXT",
            RecordType::Ns => "NS",
            RecordType::Srv => "SRV",
            RecordType::Alias => "ALIAS",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_wire_names() {
        let parsed: RecordType = serde_json::from_str(r#""AAAA""#).unwrap();
        assert_eq!(parsed, RecordType::Aaaa);
        assert_eq!(serde_json::to_string(&RecordType::Cname).unwrap(), r#""CNAME""#);
        assert_eq!(RecordType::Alias.to_string(), "ALIAS");
    }

    #[test]
    fn test_record_type_rejects_unknown_and_lowercase() {
        assert!(serde_json::from_str::<RecordType>(r#""PTR""#).is_err());
        assert!(serde_json::from_str::<RecordType>(r#""a""#).is_err());
    }
}
