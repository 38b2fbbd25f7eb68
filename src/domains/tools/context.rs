//! Per-invocation state shared by tool handlers.

use crate::domains::registrar::{AccountId, ApiClient};

/// What every handler gets once the credential and account are resolved.
pub struct ToolContext<'a> {
    pub client: ApiClient<'a>,
    pub account_id: AccountId,
    pub max_pages: u32,
}

impl<'a> ToolContext<'a> {
    pub fn new(client: ApiClient<'a>, account_id: AccountId, max_pages: u32) -> Self {
        Self {
            client,
            account_id,
            max_pages,
        }
    }

    /// Account-scoped API path: `/{account}{suffix}`.
    pub fn path(&self, suffix: &str) -> String {
        format!("/{}{}", self.account_id, suffix)
    }
}

#[cfg(test)]
pub(crate) fn test_context(
    fake: &crate::domains::registrar::testing::FakeRegistrar,
) -> ToolContext<'_> {
    use crate::domains::registrar::Credential;
    use crate::domains::registrar::testing::ACCOUNT_ID;

    ToolContext::new(
        ApiClient::new(fake, Credential::new("test-token")),
        AccountId::new(ACCOUNT_ID),
        100,
    )
}
