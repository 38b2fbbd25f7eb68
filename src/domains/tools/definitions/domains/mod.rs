//! Registrar-side domain tools: listing, pricing, auto-renew and transfers.

pub mod autorenew;
pub mod costs;
pub mod list;
mod pricing;
pub mod renewal;
pub mod transfer;

pub use autorenew::{DisableAutorenewParams, DisableAutorenewTool};
pub use costs::{DomainCostsParams, DomainCostsTool};
pub use list::{ListDomainsParams, ListDomainsTool};
pub use renewal::{RenewalCostsParams, RenewalCostsTool};
pub use transfer::{TransferDomainParams, TransferDomainTool};
