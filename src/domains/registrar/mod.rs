//! Registrar domain module.
//!
//! Everything needed to talk to the DNSimple v2 API on behalf of one tool
//! invocation:
//!
//! - `credentials` - API token resolution (env, credential file, secret helper)
//! - `secret_helper` - optional external secret manager
//! - `account` - account id resolution with the multi-account fallback
//! - `client` - request/response types and the HTTP backend seam
//! - `pagination` - "fetch every page" primitive for list endpoints

pub mod account;
pub mod client;
pub mod credentials;
mod error;
pub mod pagination;
pub mod secret_helper;

#[cfg(test)]
pub mod testing;

pub use account::{AccountId, resolve_account};
pub use client::{ApiClient, ApiRequest, ApiResponse, HttpBackend, ReqwestBackend};
pub use credentials::{Credential, CredentialResolver, CredentialSource, NoSecretSource};
pub use error::RegistrarError;
pub use pagination::fetch_all_pages;
