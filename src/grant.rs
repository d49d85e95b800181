//! Password-grant surface consumed by the token endpoint.
//!
//! The grant executor hands over one token request per call and gets back
//! either the verified user id (plus the refresh-token lifetime to issue
//! with) or a denial it renders as the standard OAuth2 `invalid_grant`
//! error with HTTP 400. Token encoding and transport stay with the caller.

use anyhow::Result;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::authenticator::ThrottledAuthenticator;
use crate::config::{ClientRecord, GrantConfig};

/// Grant type this plugin answers for.
pub const GRANT_TYPE_PASSWORD: &str = "password";

/// One password-grant token request, as lifted from the endpoint body.
#[derive(Debug, Deserialize)]
pub struct GrantRequest {
    pub grant_type: String,
    pub username: String,
    pub password: SecretString,
    /// Network address the request arrived from, when the transport knows it.
    #[serde(default)]
    pub client_ip: Option<String>,
}

/// Outcome of one grant execution.
#[derive(Debug, PartialEq, Eq)]
pub enum GrantOutcome {
    /// Credentials verified; issue tokens for `user_id` with the given
    /// refresh-token lifetime.
    Granted {
        user_id: Uuid,
        refresh_token_ttl: Duration,
    },
    /// Undifferentiated denial; render as `invalid_grant`.
    Denied,
}

/// Standard OAuth2 token error body, sent with HTTP 400.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

impl ErrorResponse {
    /// The one body every denial collapses to: `{"error":"invalid_grant"}`.
    #[must_use]
    pub const fn invalid_grant() -> Self {
        Self {
            error: "invalid_grant",
        }
    }
}

/// The password grant: credential verification plus the sibling
/// refresh-token-lifetime concern.
///
/// Should only be wired up for trusted, first-party clients; it exists for
/// decoupled frontends that collect the resource owner's password directly.
pub struct PasswordGrant {
    authenticator: ThrottledAuthenticator,
    config: GrantConfig,
}

impl PasswordGrant {
    #[must_use]
    pub fn new(authenticator: ThrottledAuthenticator, config: GrantConfig) -> Self {
        Self {
            authenticator,
            config,
        }
    }

    /// Execute one token request for `client`.
    ///
    /// Requests for any other grant type are denied here; grant dispatch by
    /// type belongs to the endpoint, and a mismatch reaching this far must
    /// not leak anything either. Infrastructure failures propagate as `Err`
    /// for the endpoint to surface, never as a denial.
    pub async fn execute(
        &self,
        request: &GrantRequest,
        client: &ClientRecord,
    ) -> Result<GrantOutcome> {
        if request.grant_type != GRANT_TYPE_PASSWORD {
            debug!(
                grant_type = %request.grant_type,
                client_id = %client.client_id,
                "unsupported grant type"
            );
            return Ok(GrantOutcome::Denied);
        }

        let user_id = self
            .authenticator
            .authenticate(
                &request.username,
                &request.password,
                request.client_ip.as_deref(),
            )
            .await?;

        Ok(match user_id {
            Some(user_id) => GrantOutcome::Granted {
                user_id,
                refresh_token_ttl: self.config.refresh_token_ttl(client),
            },
            None => GrantOutcome::Denied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorResponse, GrantRequest};
    use secrecy::ExposeSecret;

    #[test]
    fn invalid_grant_body_matches_oauth2() {
        let body = serde_json::to_string(&ErrorResponse::invalid_grant()).unwrap();
        assert_eq!(body, r#"{"error":"invalid_grant"}"#);
    }

    #[test]
    fn grant_request_deserializes_from_token_body() {
        let request: GrantRequest = serde_json::from_str(
            r#"{"grant_type":"password","username":"alice","password":"hunter2"}"#,
        )
        .unwrap();
        assert_eq!(request.grant_type, "password");
        assert_eq!(request.username, "alice");
        assert_eq!(request.password.expose_secret(), "hunter2");
        assert_eq!(request.client_ip, None);
    }

    #[test]
    fn grant_request_debug_hides_password() {
        let request: GrantRequest = serde_json::from_str(
            r#"{"grant_type":"password","username":"alice","password":"hunter2","client_ip":"10.0.0.1"}"#,
        )
        .unwrap();
        let debug = format!("{request:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("10.0.0.1"));
    }
}
