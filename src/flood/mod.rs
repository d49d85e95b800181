//! Failed-attempt counters with sliding windows.
//!
//! Two counter families protect the password grant:
//!
//! - [`FAILED_LOGIN_IP`], keyed by client IP (or unkeyed for one global
//!   bucket), catches one source probing many accounts.
//! - [`FAILED_LOGIN_USER`], keyed by account id (optionally salted with the
//!   IP), catches one account being attacked from many sources.
//!
//! The two families share a store but never a key; registering or clearing
//! one never touches the other.

mod memory;

pub use memory::MemoryFlood;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Counter family for per-IP failed logins.
pub const FAILED_LOGIN_IP: &str = "password_grant.failed_login_ip";

/// Counter family for per-account failed logins.
pub const FAILED_LOGIN_USER: &str = "password_grant.failed_login_user";

/// Shared attempt-counter store.
///
/// Counters are keyed by `(name, identifier)`; `identifier = None` is a
/// single global bucket for that name. Implementations must provide atomic
/// check/register semantics per key under concurrent access: two
/// simultaneous registrations are both recorded, and `is_allowed` sees a
/// consistent count.
#[async_trait]
pub trait Flood: Send + Sync {
    /// Whether fewer than `limit` events are on record for the key within
    /// `window`.
    async fn is_allowed(
        &self,
        name: &str,
        limit: u32,
        window: Duration,
        identifier: Option<&str>,
    ) -> Result<bool>;

    /// Record one event against the key; it expires after `window`.
    async fn register(&self, name: &str, window: Duration, identifier: Option<&str>)
        -> Result<()>;

    /// Forget every event on record for the key.
    async fn clear(&self, name: &str, identifier: Option<&str>) -> Result<()>;
}
