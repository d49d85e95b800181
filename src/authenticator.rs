//! The throttled authentication decision chain.

use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::account::Account;
use crate::config::FloodConfig;
use crate::flood::{Flood, FAILED_LOGIN_IP, FAILED_LOGIN_USER};
use crate::oracle::CredentialVerifier;
use crate::resolver::IdentityResolver;

/// Password verification wrapped in dual-key flood protection.
///
/// Per attempt: the IP gate runs before identity resolution (probing many
/// usernames from one source is throttled even when every username is
/// invalid), the account gate runs before the credential oracle (a locked
/// account declines even the correct password), and every decline is the
/// same `Ok(None)`.
pub struct ThrottledAuthenticator {
    resolver: IdentityResolver,
    flood: Arc<dyn Flood>,
    verifier: Arc<dyn CredentialVerifier>,
    config: FloodConfig,
}

impl ThrottledAuthenticator {
    #[must_use]
    pub fn new(
        resolver: IdentityResolver,
        flood: Arc<dyn Flood>,
        verifier: Arc<dyn CredentialVerifier>,
        config: FloodConfig,
    ) -> Self {
        Self {
            resolver,
            flood,
            verifier,
            config,
        }
    }

    /// Verify `password` for `username_or_email` from `client_ip`.
    ///
    /// `Ok(Some(user_id))` on success. `Ok(None)` for every decline — IP
    /// throttled, unknown or inactive account, account throttled, wrong
    /// password — with no distinguishing signal. `Err` only when the
    /// directory, counter store, or oracle call itself fails; infrastructure
    /// trouble is never silently reported as a decline.
    ///
    /// Counter effects per outcome:
    ///
    /// | outcome            | IP counter | account counter |
    /// |--------------------|------------|-----------------|
    /// | empty input        | —          | —               |
    /// | IP gate tripped    | —          | —               |
    /// | unknown account    | +1         | —               |
    /// | account gate trips | +1         | —               |
    /// | wrong password     | +1         | +1              |
    /// | success            | —          | cleared         |
    pub async fn authenticate(
        &self,
        username_or_email: &str,
        password: &SecretString,
        client_ip: Option<&str>,
    ) -> Result<Option<Uuid>> {
        // No network-facing attempt happened; touch nothing.
        if username_or_email.is_empty() || password.expose_secret().is_empty() {
            return Ok(None);
        }

        // The IP limit is deliberately high: one apparent IP may front a
        // whole institution. A tripped gate registers nothing further and
        // decays on its own window.
        if !self
            .flood
            .is_allowed(
                FAILED_LOGIN_IP,
                self.config.ip_limit(),
                self.config.ip_window(),
                client_ip,
            )
            .await?
        {
            warn!(client_ip, "login declined: IP flood limit reached");
            return Ok(None);
        }

        let Some(account) = self.resolver.resolve(username_or_email).await? else {
            self.register_ip_failure(client_ip).await?;
            return Ok(None);
        };

        let identifier = self.account_key(&account, client_ip);
        if !self
            .flood
            .is_allowed(
                FAILED_LOGIN_USER,
                self.config.user_limit(),
                self.config.user_window(),
                Some(&identifier),
            )
            .await?
        {
            // The attempt still reached the network, so it counts against
            // the IP even though the credential check never ran.
            warn!(user_id = %account.id, "login declined: account flood limit reached");
            self.register_ip_failure(client_ip).await?;
            return Ok(None);
        }

        match self
            .verifier
            .authenticate(&account.username, password)
            .await?
        {
            Some(user_id) => {
                // Forgive prior failures on this account. The IP counter
                // stays: it is a per-source nuisance counter, not tied to
                // any one account.
                self.flood
                    .clear(FAILED_LOGIN_USER, Some(&identifier))
                    .await?;
                Ok(Some(user_id))
            }
            None => {
                debug!(user_id = %account.id, "login declined: credential mismatch");
                self.flood
                    .register(
                        FAILED_LOGIN_USER,
                        self.config.user_window(),
                        Some(&identifier),
                    )
                    .await?;
                self.register_ip_failure(client_ip).await?;
                Ok(None)
            }
        }
    }

    /// Account-counter key: the account id alone under `uid_only`, otherwise
    /// salted with the client IP so an attacker spraying a public username
    /// cannot lock its owner out. Without a client IP the key degrades to
    /// the id alone.
    fn account_key(&self, account: &Account, client_ip: Option<&str>) -> String {
        match client_ip {
            Some(ip) if !self.config.uid_only() => format!("{}-{ip}", account.id),
            _ => account.id.to_string(),
        }
    }

    async fn register_ip_failure(&self, client_ip: Option<&str>) -> Result<()> {
        self.flood
            .register(FAILED_LOGIN_IP, self.config.ip_window(), client_ip)
            .await
    }
}
