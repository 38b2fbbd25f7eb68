//! Account resolution.
//!
//! Every API path is scoped by an account id. `/whoami` returns it directly
//! for account tokens; user tokens with access to several accounts get a
//! null account there, in which case the first entry of `/accounts` is used.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::client::{ApiClient, id_to_string};
use super::error::RegistrarError;

/// Account identifier scoping the calls of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
struct WhoAmI {
    #[serde(default)]
    account: Option<AccountRef>,
}

#[derive(Debug, Deserialize)]
struct AccountRef {
    #[serde(default)]
    id: Value,
}

/// Resolve the account the credential acts on.
#[instrument(skip_all)]
pub fn resolve_account(client: &ApiClient<'_>) -> Result<AccountId, RegistrarError> {
    let whoami: Envelope<WhoAmI> = client.get("/whoami")?.error_for_status()?.json()?;

    let whoami = whoami
        .data
        .ok_or_else(|| RegistrarError::malformed("missing 'data' key"))?;

    if let Some(id) = whoami.account.as_ref().and_then(|a| id_to_string(&a.id)) {
        debug!(account_id = %id, "Account resolved from whoami");
        return Ok(AccountId(id));
    }

    debug!("whoami returned no account, falling back to account listing");

    let accounts: Envelope<Vec<AccountRef>> =
        client.get("/accounts")?.error_for_status()?.json()?;

    accounts
        .data
        .unwrap_or_default()
        .first()
        .and_then(|a| id_to_string(&a.id))
        .map(AccountId)
        .ok_or(RegistrarError::NoAccount)
}
