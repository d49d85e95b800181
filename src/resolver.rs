//! Username-or-email identity resolution.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::account::Account;
use crate::directory::{Directory, FindBy};

/// Maps a user-supplied login string to at most one active account.
#[derive(Clone)]
pub struct IdentityResolver {
    directory: Arc<dyn Directory>,
}

impl IdentityResolver {
    #[must_use]
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    /// Resolve `username_or_email` against the directory.
    ///
    /// Input containing `@` is tried as an email address first; on a miss,
    /// or for any other input, it is tried as an exact username. Only active
    /// accounts resolve, and `None` is the sole failure signal — the caller
    /// cannot tell a missing account from an inactive one.
    pub async fn resolve(&self, username_or_email: &str) -> Result<Option<Account>> {
        if username_or_email.contains('@') {
            if let Some(account) = self
                .directory
                .find_active_by(FindBy::Email, username_or_email)
                .await?
            {
                return Ok(Some(account));
            }
        }

        let account = self
            .directory
            .find_active_by(FindBy::Username, username_or_email)
            .await?;
        if account.is_none() {
            debug!(login = username_or_email, "no active account resolved");
        }
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::IdentityResolver;
    use crate::account::Account;
    use crate::directory::{Directory, FindBy};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Arc;
    use uuid::Uuid;

    struct FakeDirectory {
        accounts: Vec<Account>,
    }

    #[async_trait]
    impl Directory for FakeDirectory {
        async fn find_active_by(
            &self,
            property: FindBy,
            value: &str,
        ) -> Result<Option<Account>> {
            Ok(self
                .accounts
                .iter()
                .filter(|account| account.active)
                .find(|account| match property {
                    FindBy::Username => account.username == value,
                    FindBy::Email => account.email.as_deref() == Some(value),
                })
                .cloned())
        }
    }

    fn resolver(accounts: Vec<Account>) -> IdentityResolver {
        IdentityResolver::new(Arc::new(FakeDirectory { accounts }))
    }

    fn account(username: &str, email: Option<&str>, active: bool) -> Account {
        Account {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.map(ToString::to_string),
            active,
        }
    }

    #[tokio::test]
    async fn resolves_by_username() -> Result<()> {
        let alice = account("alice", Some("alice@example.com"), true);
        let resolver = resolver(vec![alice.clone()]);
        assert_eq!(resolver.resolve("alice").await?, Some(alice));
        Ok(())
    }

    #[tokio::test]
    async fn resolves_by_email() -> Result<()> {
        let alice = account("alice", Some("alice@example.com"), true);
        let resolver = resolver(vec![alice.clone()]);
        assert_eq!(resolver.resolve("alice@example.com").await?, Some(alice));
        Ok(())
    }

    #[tokio::test]
    async fn email_miss_falls_back_to_username() -> Result<()> {
        // A username that happens to contain '@' still resolves.
        let odd = account("bob@corp", None, true);
        let resolver = resolver(vec![odd.clone()]);
        assert_eq!(resolver.resolve("bob@corp").await?, Some(odd));
        Ok(())
    }

    #[tokio::test]
    async fn email_match_wins_over_username_match() -> Result<()> {
        // One account's email collides with another's username; email is
        // tried first for '@' input.
        let by_email = account("carol", Some("shared@example.com"), true);
        let by_name = account("shared@example.com", None, true);
        let resolver = resolver(vec![by_name, by_email.clone()]);
        assert_eq!(resolver.resolve("shared@example.com").await?, Some(by_email));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_login_resolves_to_none() -> Result<()> {
        let resolver = resolver(vec![account("alice", None, true)]);
        assert_eq!(resolver.resolve("mallory").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn inactive_accounts_do_not_resolve() -> Result<()> {
        let resolver = resolver(vec![account("alice", Some("alice@example.com"), false)]);
        assert_eq!(resolver.resolve("alice").await?, None);
        assert_eq!(resolver.resolve("alice@example.com").await?, None);
        Ok(())
    }
}
