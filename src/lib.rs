//! # OAuth2 password-grant credential verification
//!
//! The decision core behind a password-grant token endpoint: given a
//! username-or-email, a plaintext password, and the client IP, resolve the
//! identity, verify the credential, and answer with either a stable user id
//! or an undifferentiated decline.
//!
//! ## Flood protection
//!
//! Failed attempts are counted against two independent sliding-window
//! counters:
//!
//! - **Per IP** (`password_grant.failed_login_ip`, default 50 per hour) —
//!   catches one source probing many accounts, even when every username is
//!   invalid. Checked before identity resolution.
//! - **Per account** (`password_grant.failed_login_user`, default 5 per six
//!   hours) — catches one target being attacked from rotating sources.
//!   Checked after resolution, before the credential check.
//!
//! A successful login clears the account counter; the IP counter only ever
//! decays on its own window.
//!
//! ## Enumeration resistance
//!
//! Every decline — IP throttled, unknown account, inactive account, account
//! throttled, wrong password — is the same `Ok(None)`. Callers render all of
//! them as the generic OAuth2 `invalid_grant` error. Only infrastructure
//! failures (directory, counter store, oracle) surface as `Err`.
//!
//! ## Wiring
//!
//! The directory service, counter store, and credential oracle are injected
//! as `Arc<dyn Trait>`; nothing here reaches for ambient state. Hosting
//! services bring their own storage behind [`Directory`] and [`Flood`];
//! [`MemoryFlood`] is the in-process counter implementation.

pub mod account;
pub mod authenticator;
pub mod config;
pub mod directory;
pub mod flood;
pub mod grant;
pub mod oracle;
pub mod resolver;

pub use account::Account;
pub use authenticator::ThrottledAuthenticator;
pub use config::{ClientRecord, FloodConfig, GrantConfig};
pub use directory::{Directory, FindBy};
pub use flood::{Flood, MemoryFlood};
pub use grant::{ErrorResponse, GrantOutcome, GrantRequest, PasswordGrant};
pub use oracle::CredentialVerifier;
pub use resolver::IdentityResolver;
