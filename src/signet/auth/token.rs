//! Signed, time-limited identity tokens.
//!
//! Tokens are JWTs (compact serialization) signed with HMAC-SHA256 over a
//! single server secret. They carry the user id in `sub` and unix-second
//! `iat`/`exp` claims. Verification is stateless; rotating the secret is the
//! only way to invalidate outstanding tokens.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, get_current_timestamp, Algorithm, DecodingKey,
    EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::AuthError;

pub const MIN_SECRET_BYTES: usize = 32;
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 2 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Build the service from the process-wide secret.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the secret is shorter than [`MIN_SECRET_BYTES`].
    pub fn new(secret: &SecretString, ttl: Duration) -> Result<Self, AuthError> {
        let bytes = secret.expose_secret().as_bytes();
        if bytes.len() < MIN_SECRET_BYTES {
            return Err(AuthError::InvalidInput(format!(
                "token secret must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl,
        })
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user_id` expiring `ttl` from now.
    ///
    /// # Errors
    /// Returns `UpstreamFailure` if signing fails.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.issue_at(user_id, get_current_timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    /// Returns `UpstreamFailure` if signing fails.
    pub fn issue_at(&self, user_id: Uuid, now: u64) -> Result<String, AuthError> {
        let claims = TokenClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl.as_secs()),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(AuthError::upstream)
    }

    /// Resolve a token back into the user id it was issued for.
    ///
    /// # Errors
    /// Returns `InvalidToken` for forged, malformed, or expired tokens.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        self.verify_at(token, get_current_timestamp())
    }

    /// Verify against an explicit clock.
    ///
    /// # Errors
    /// Returns `InvalidToken` for forged, malformed, or expired tokens.
    pub fn verify_at(&self, token: &str, now: u64) -> Result<Uuid, AuthError> {
        let claims = decode::<TokenClaims>(token, &self.decoding, &validation())
            .map_err(|err| {
                match err.kind() {
                    ErrorKind::InvalidSignature => debug!("token signature mismatch"),
                    kind => debug!("token rejected: {kind:?}"),
                }
                AuthError::InvalidToken
            })?
            .claims;

        if claims.exp <= now {
            debug!("token expired");
            return Err(AuthError::InvalidToken);
        }

        Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"***")
            .field("ttl", &self.ttl)
            .finish()
    }
}

// Expiry is checked by hand in `verify_at` so the clock stays injectable.
fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "exp"]);
    validation
}

/// Read claims without checking the signature.
///
/// Only for holders of a token who lack the secret (the client deciding
/// whether a stored token has expired). Never use the result to grant access.
///
/// # Errors
/// Returns `InvalidToken` if the token does not decode.
pub fn peek_claims(token: &str) -> Result<TokenClaims, AuthError> {
    let mut validation = validation();
    validation.insecure_disable_signature_validation();
    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
}
