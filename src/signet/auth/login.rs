//! Login and registration orchestration.
//!
//! Flow Overview: the verifier resolves credentials into a user, the token
//! service signs that user's id, and the caller gets both back. Neither step
//! mutates the user.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{hash_password, normalize_email, password::MIN_PASSWORD_LEN, AuthError, AuthState};
use crate::signet::store::{User, UserProfile};

/// Successful login/registration answer.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserProfile,
}

/// Basic email format check.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Verify credentials and issue a token for the matching user.
///
/// # Errors
/// `AuthenticationFailed` on bad credentials, `UpstreamFailure` otherwise.
#[instrument(skip_all)]
pub async fn login(
    state: &AuthState,
    email: &str,
    password: &str,
) -> Result<AuthPayload, AuthError> {
    let user = state.verifier().verify(email, password).await?;
    let token = state.tokens().issue(user.id)?;

    info!(user_id = %user.id, "login succeeded");

    Ok(AuthPayload {
        token,
        user: user.profile(),
    })
}

/// Create a user and log them in.
///
/// # Errors
/// `InvalidInput` for a malformed email, short password, or empty name;
/// `EmailTaken` when the store already holds the email.
#[instrument(skip_all)]
pub async fn register(
    state: &AuthState,
    email: &str,
    password: &str,
    name: &str,
) -> Result<AuthPayload, AuthError> {
    let email = normalize_email(email);
    if !valid_email(email) {
        return Err(AuthError::InvalidInput("invalid email".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::InvalidInput("name is required".to_string()));
    }

    let plaintext = password.to_string();
    let password_hash = spawn_blocking(move || hash_password(&plaintext))
        .await
        .map_err(AuthError::upstream)?
        .map_err(AuthError::UpstreamFailure)?;

    let user = User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash,
        name: name.to_string(),
    };
    state.store().insert(user.clone()).await?;
    let token = state.tokens().issue(user.id)?;

    info!(user_id = %user.id, "user registered");

    Ok(AuthPayload {
        token,
        user: user.profile(),
    })
}
