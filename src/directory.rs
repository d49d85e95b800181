//! Directory-service contract: account lookup.

use anyhow::Result;
use async_trait::async_trait;

use crate::account::Account;

/// Account property a lookup can match against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FindBy {
    Username,
    Email,
}

/// External user directory.
///
/// Lookups are restricted to **active** accounts: an inactive account is
/// indistinguishable from a missing one, so no decline path can leak account
/// state. `Ok(None)` is the expected miss; `Err` means the directory call
/// itself failed.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Find the active account whose `property` equals `value` exactly.
    ///
    /// Duplicate matches are a directory-level invariant violation;
    /// implementations return the first match.
    async fn find_active_by(&self, property: FindBy, value: &str) -> Result<Option<Account>>;
}
