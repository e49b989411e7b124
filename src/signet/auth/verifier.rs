use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::{debug, instrument};

use super::{
    password::{hash_password, verify_password},
    AuthError,
};
use crate::signet::store::{User, UserStore};

/// Email lookup key: surrounding whitespace dropped, case preserved.
#[must_use]
pub fn normalize_email(email: &str) -> &str {
    email.trim()
}

/// Checks submitted credentials against the user store.
pub struct CredentialVerifier {
    store: Arc<dyn UserStore>,
    // Verified against when the email is unknown so both failure paths cost one
    // Argon2 run.
    dummy_hash: String,
}

impl CredentialVerifier {
    /// # Errors
    /// Returns an error if the dummy hash cannot be computed.
    pub fn new(store: Arc<dyn UserStore>) -> anyhow::Result<Self> {
        Ok(Self {
            store,
            dummy_hash: hash_password("signet-dummy-password")?,
        })
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Resolve `(email, password)` into the matching user.
    ///
    /// # Errors
    /// `AuthenticationFailed` for an unknown email or a wrong password (same
    /// error either way), `UpstreamFailure` if the store or hasher fails.
    #[instrument(skip_all)]
    pub async fn verify(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.store.find_by_email(normalize_email(email)).await?;

        let stored_hash = user
            .as_ref()
            .map_or_else(|| self.dummy_hash.clone(), |user| user.password_hash.clone());
        let password = password.to_string();
        let matches = spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(AuthError::upstream)?;

        match user {
            Some(user) if matches => Ok(user),
            Some(_) => {
                debug!("password mismatch");
                Err(AuthError::AuthenticationFailed)
            }
            None => {
                debug!("no user for email");
                Err(AuthError::AuthenticationFailed)
            }
        }
    }
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signet::store::testing::{seeded_store, DownStore};
    use anyhow::Result;

    async fn verifier_with(
        email: &str,
        password: &str,
    ) -> Result<(CredentialVerifier, uuid::Uuid)> {
        let (store, id) = seeded_store(email, password).await?;
        Ok((CredentialVerifier::new(store)?, id))
    }

    #[test]
    fn normalize_email_trims_only() {
        assert_eq!(normalize_email("  Ada@Example.com \n"), "Ada@Example.com");
    }

    #[tokio::test]
    async fn matching_credentials_return_user() -> Result<()> {
        let (verifier, id) = verifier_with("a@x.com", "correct").await?;
        let user = verifier.verify("a@x.com", "correct").await?;
        assert_eq!(user.id, id);
        Ok(())
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_ignored() -> Result<()> {
        let (verifier, id) = verifier_with("a@x.com", "correct").await?;
        let user = verifier.verify(" a@x.com ", "correct").await?;
        assert_eq!(user.id, id);
        Ok(())
    }

    #[tokio::test]
    async fn email_case_matters() -> Result<()> {
        let (verifier, _) = verifier_with("a@x.com", "correct").await?;
        let result = verifier.verify("A@X.com", "correct").await;
        assert!(matches!(result, Err(AuthError::AuthenticationFailed)));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_the_same() -> Result<()> {
        let (verifier, _) = verifier_with("a@x.com", "correct").await?;

        let wrong_password = verifier.verify("a@x.com", "wrong").await;
        let unknown_email = verifier.verify("b@x.com", "correct").await;

        let (Err(first), Err(second)) = (wrong_password, unknown_email) else {
            anyhow::bail!("both attempts must fail");
        };
        assert!(matches!(first, AuthError::AuthenticationFailed));
        assert!(matches!(second, AuthError::AuthenticationFailed));
        assert_eq!(first.to_string(), second.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn store_outage_is_upstream_failure() -> Result<()> {
        let verifier = CredentialVerifier::new(Arc::new(DownStore))?;
        let result = verifier.verify("a@x.com", "correct").await;
        assert!(matches!(result, Err(AuthError::UpstreamFailure(_))));
        Ok(())
    }
}
