//! Auth state and configuration shared by every request.

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

use super::{token::DEFAULT_TOKEN_TTL_SECONDS, AuthError, CredentialVerifier, TokenService};
use crate::signet::store::UserStore;

const DEFAULT_FRONTEND_BASE_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct AuthConfig {
    frontend_base_url: String,
    token_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FRONTEND_BASE_URL.to_string())
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_base_url: String) -> Self {
        Self {
            frontend_base_url,
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_token_ttl_seconds(mut self, seconds: u64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    #[must_use]
    pub const fn token_ttl_seconds(&self) -> u64 {
        self.token_ttl_seconds
    }
}

/// Read-only after startup: the signing key and the verifier's store handle.
#[derive(Debug)]
pub struct AuthState {
    config: AuthConfig,
    tokens: TokenService,
    verifier: CredentialVerifier,
}

impl AuthState {
    /// # Errors
    /// Returns an error if the secret is too short or the verifier cannot be built.
    pub fn new(
        config: AuthConfig,
        secret: &SecretString,
        store: Arc<dyn UserStore>,
    ) -> Result<Self, AuthError> {
        let tokens = TokenService::new(secret, Duration::from_secs(config.token_ttl_seconds()))?;
        let verifier = CredentialVerifier::new(store).map_err(AuthError::UpstreamFailure)?;
        Ok(Self {
            config,
            tokens,
            verifier,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub const fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    #[must_use]
    pub const fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn UserStore> {
        self.verifier.store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signet::store::MemoryUserStore;

    #[test]
    fn config_defaults_and_overrides() {
        let config = AuthConfig::default();
        assert_eq!(config.frontend_base_url(), "http://localhost:3000");
        assert_eq!(config.token_ttl_seconds(), DEFAULT_TOKEN_TTL_SECONDS);

        let config = config.with_token_ttl_seconds(60);
        assert_eq!(config.token_ttl_seconds(), 60);
    }

    #[test]
    fn state_refuses_short_secret() {
        let result = AuthState::new(
            AuthConfig::default(),
            &SecretString::from("short".to_string()),
            Arc::new(MemoryUserStore::new()),
        );
        assert!(matches!(result, Err(AuthError::InvalidInput(_))));
    }
}
