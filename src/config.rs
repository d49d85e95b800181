//! Flood-protection and grant configuration.

use std::time::Duration;

const DEFAULT_IP_LIMIT: u32 = 50;
const DEFAULT_IP_WINDOW: Duration = Duration::from_secs(60 * 60);
const DEFAULT_USER_LIMIT: u32 = 5;
const DEFAULT_USER_WINDOW: Duration = Duration::from_secs(6 * 60 * 60);
const DEFAULT_REFRESH_TOKEN_TTL: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// Limits and windows for the two failed-login counter families.
#[derive(Clone, Debug)]
pub struct FloodConfig {
    ip_limit: u32,
    ip_window: Duration,
    user_limit: u32,
    user_window: Duration,
    uid_only: bool,
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FloodConfig {
    /// Defaults: 50 failed attempts per IP per hour, 5 per account per six
    /// hours, account counter salted with the client IP.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ip_limit: DEFAULT_IP_LIMIT,
            ip_window: DEFAULT_IP_WINDOW,
            user_limit: DEFAULT_USER_LIMIT,
            user_window: DEFAULT_USER_WINDOW,
            uid_only: false,
        }
    }

    #[must_use]
    pub fn with_ip_limit(mut self, limit: u32) -> Self {
        self.ip_limit = limit;
        self
    }

    #[must_use]
    pub fn with_ip_window(mut self, window: Duration) -> Self {
        self.ip_window = window;
        self
    }

    #[must_use]
    pub fn with_user_limit(mut self, limit: u32) -> Self {
        self.user_limit = limit;
        self
    }

    #[must_use]
    pub fn with_user_window(mut self, window: Duration) -> Self {
        self.user_window = window;
        self
    }

    /// Key the account counter by account id alone, so failures apply across
    /// every source IP. Most secure, but an attacker who knows a public
    /// username can lock its owner out; the default salts the key with the
    /// client IP instead.
    #[must_use]
    pub fn with_uid_only(mut self, uid_only: bool) -> Self {
        self.uid_only = uid_only;
        self
    }

    #[must_use]
    pub fn ip_limit(&self) -> u32 {
        self.ip_limit
    }

    #[must_use]
    pub fn ip_window(&self) -> Duration {
        self.ip_window
    }

    #[must_use]
    pub fn user_limit(&self) -> u32 {
        self.user_limit
    }

    #[must_use]
    pub fn user_window(&self) -> Duration {
        self.user_window
    }

    #[must_use]
    pub fn uid_only(&self) -> bool {
        self.uid_only
    }
}

/// Registered OAuth2 client, as far as the password grant cares about it.
#[derive(Clone, Debug)]
pub struct ClientRecord {
    /// Client identifier as registered with the authorization server.
    pub client_id: String,
    /// Per-client refresh-token lifetime override.
    pub refresh_token_expiration: Option<Duration>,
}

/// Grant-level configuration exposed alongside the authentication decision.
#[derive(Clone, Debug)]
pub struct GrantConfig {
    refresh_token_ttl: Duration,
}

impl Default for GrantConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GrantConfig {
    /// Default refresh-token lifetime: 1,209,600 seconds (14 days).
    #[must_use]
    pub fn new() -> Self {
        Self {
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }

    #[must_use]
    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    /// Effective refresh-token lifetime for `client`: its registered
    /// override if set, the configured default otherwise.
    #[must_use]
    pub fn refresh_token_ttl(&self, client: &ClientRecord) -> Duration {
        client
            .refresh_token_expiration
            .unwrap_or(self.refresh_token_ttl)
    }
}

impl ClientRecord {
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            refresh_token_expiration: None,
        }
    }

    #[must_use]
    pub fn with_refresh_token_expiration(mut self, ttl: Duration) -> Self {
        self.refresh_token_expiration = Some(ttl);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientRecord, FloodConfig, GrantConfig};
    use std::time::Duration;

    #[test]
    fn flood_config_defaults_and_overrides() {
        let config = FloodConfig::new();

        assert_eq!(config.ip_limit(), 50);
        assert_eq!(config.ip_window(), Duration::from_secs(3600));
        assert_eq!(config.user_limit(), 5);
        assert_eq!(config.user_window(), Duration::from_secs(21600));
        assert!(!config.uid_only());

        let config = config
            .with_ip_limit(10)
            .with_ip_window(Duration::from_secs(60))
            .with_user_limit(3)
            .with_user_window(Duration::from_secs(120))
            .with_uid_only(true);

        assert_eq!(config.ip_limit(), 10);
        assert_eq!(config.ip_window(), Duration::from_secs(60));
        assert_eq!(config.user_limit(), 3);
        assert_eq!(config.user_window(), Duration::from_secs(120));
        assert!(config.uid_only());
    }

    #[test]
    fn refresh_token_ttl_defaults_to_fourteen_days() {
        let config = GrantConfig::new();
        let client = ClientRecord::new("frontend");
        assert_eq!(
            config.refresh_token_ttl(&client),
            Duration::from_secs(1_209_600)
        );
    }

    #[test]
    fn refresh_token_ttl_honors_client_override() {
        let config = GrantConfig::new();
        let client =
            ClientRecord::new("frontend").with_refresh_token_expiration(Duration::from_secs(3600));
        assert_eq!(
            config.refresh_token_ttl(&client),
            Duration::from_secs(3600)
        );
    }

}
