//! API token resolution.
//!
//! The token is looked up fresh on every tool invocation, in order:
//!
//! 1. the `DNSIMPLE_API_TOKEN` environment variable,
//! 2. a `DNSIMPLE_API_TOKEN=...` line in the per-user credential file,
//! 3. an optional secret helper, probed once at startup.
//!
//! The first non-empty hit wins. Every failure along the way is treated as
//! "not found" and the search moves on.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::secret_helper::SecretHelper;
use crate::core::config::CredentialsConfig;

/// Secret manager entry holding the token.
pub const SECRET_ENTRY: &str = "DNSimple";

/// Domain the token is filed under in the secret manager.
pub const SECRET_DOMAIN: &str = "dnsimple.com";

/// Field names the token may be stored under, tried in order.
pub const SECRET_FIELDS: [&str; 4] = ["access token", "api_token", "token", "api token"];

/// An opaque bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// An external secret store that may hold the token.
pub trait CredentialSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Look up `field` of the entry called `entry`.
    fn by_name(&self, entry: &str, field: &str) -> Option<String>;

    /// Look up `field` of the entry filed under `domain`.
    fn by_domain(&self, domain: &str, field: &str) -> Option<String>;
}

/// Stand-in used when no secret manager was found at startup.
#[derive(Debug, Default)]
pub struct NoSecretSource;

impl CredentialSource for NoSecretSource {
    fn name(&self) -> &str {
        "none"
    }

    fn by_name(&self, _entry: &str, _field: &str) -> Option<String> {
        None
    }

    fn by_domain(&self, _domain: &str, _field: &str) -> Option<String> {
        None
    }
}

/// Resolves the API token from the configured sources.
pub struct CredentialResolver {
    token_var: String,
    env_file: Option<PathBuf>,
    secret_source: Arc<dyn CredentialSource>,
}

impl CredentialResolver {
    pub fn new(
        token_var: impl Into<String>,
        env_file: Option<PathBuf>,
        secret_source: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            token_var: token_var.into(),
            env_file,
            secret_source,
        }
    }

    /// Build the resolver, probing for the secret helper once.
    pub fn from_config(config: &CredentialsConfig) -> Self {
        let secret_source: Arc<dyn CredentialSource> =
            match SecretHelper::try_load(&config.secret_helper_candidates()) {
                Some(helper) => {
                    info!("Secret helper found at {}", helper.path().display());
                    Arc::new(helper)
                }
                None => {
                    debug!("No secret helper found; skipping that source");
                    Arc::new(NoSecretSource)
                }
            };

        Self::new(&config.token_var, config.env_file.clone(), secret_source)
    }

    /// Name of the environment variable holding the token.
    pub fn token_var(&self) -> &str {
        &self.token_var
    }

    /// Where the credential file is expected, for user-facing hints.
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Resolve the token, or `None` once every source is exhausted.
    pub fn resolve(&self) -> Option<Credential> {
        if let Some(token) = non_empty(std::env::var(&self.token_var).ok()) {
            debug!("API token taken from ${}", self.token_var);
            return Some(Credential(token));
        }

        if let Some(token) = self
            .env_file
            .as_deref()
            .and_then(|path| read_env_file(path, &self.token_var))
        {
            debug!("API token taken from credential file");
            return Some(Credential(token));
        }

        let token = lookup_secret(self.secret_source.as_ref());
        if token.is_some() {
            debug!("API token taken from secret source '{}'", self.secret_source.name());
        }
        token
    }
}

/// Read `key` from a `KEY=value` file. The value is everything after the
/// first `=`, trimmed, with one matching pair of surrounding quotes removed.
/// No expansion or escape processing. A missing or unreadable file yields
/// `None`.
pub fn read_env_file(path: &Path, key: &str) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let prefix = format!("{key}=");

    contents
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(&prefix))
        .and_then(|value| non_empty(Some(strip_quotes(value.trim()).to_string())))
}

fn strip_quotes(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|&q| {
            value
                .strip_prefix(q)
                .and_then(|rest| rest.strip_suffix(q))
        })
        .unwrap_or(value)
}

/// Query a secret source: every field synonym under the entry name first,
/// then every synonym under the domain.
pub fn lookup_secret(source: &dyn CredentialSource) -> Option<Credential> {
    let by_name = SECRET_FIELDS
        .iter()
        .find_map(|field| non_empty(source.by_name(SECRET_ENTRY, field)));

    by_name
        .or_else(|| {
            SECRET_FIELDS
                .iter()
                .find_map(|field| non_empty(source.by_domain(SECRET_DOMAIN, field)))
        })
        .map(Credential)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
