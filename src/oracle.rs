//! Credential-oracle contract: password verification.

use anyhow::Result;
use async_trait::async_trait;
use secrecy::SecretString;
use uuid::Uuid;

/// External password-verification primitive.
///
/// Takes the canonical username (never the raw user input) and the supplied
/// password, and answers with the verified user id or `None`. How the hash
/// comparison happens is entirely the implementation's business; this crate
/// only orchestrates around it.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verify `password` for `username`.
    ///
    /// `Ok(None)` covers every credential mismatch, including accounts the
    /// backing store refuses to authenticate. `Err` is an infrastructure
    /// failure, not a wrong password.
    async fn authenticate(&self, username: &str, password: &SecretString)
        -> Result<Option<Uuid>>;
}
