//! Session helpers over the stored token.
//!
//! The client has no secret, so it reads the expiry without checking the
//! signature. That only decides whether to bother sending the token; the
//! server still verifies it on every request.

use jsonwebtoken::get_current_timestamp;
use tracing::debug;

use super::{error::TokenStorageError, storage::TokenStorage};
use crate::signet::auth::peek_claims;

/// The stored token, if one exists and has not expired.
///
/// Expired or undecodable tokens are removed from storage.
///
/// # Errors
/// Returns an error if storage cannot be read or cleared.
pub fn current_token<S>(storage: &S) -> Result<Option<String>, TokenStorageError>
where
    S: TokenStorage + ?Sized,
{
    current_token_at(storage, get_current_timestamp())
}

/// [`current_token`] against an explicit clock (unix seconds).
///
/// # Errors
/// Returns an error if storage cannot be read or cleared.
pub fn current_token_at<S>(storage: &S, now: u64) -> Result<Option<String>, TokenStorageError>
where
    S: TokenStorage + ?Sized,
{
    let Some(token) = storage.load()? else {
        return Ok(None);
    };

    match peek_claims(&token) {
        Ok(claims) if claims.exp > now => Ok(Some(token)),
        _ => {
            debug!("dropping stale token");
            storage.clear()?;
            Ok(None)
        }
    }
}

/// # Errors
/// Returns an error if storage cannot be read or cleared.
pub fn logged_in<S>(storage: &S) -> Result<bool, TokenStorageError>
where
    S: TokenStorage + ?Sized,
{
    Ok(current_token(storage)?.is_some())
}

/// Forget the stored token. Tokens are not revocable, so this is local only.
///
/// # Errors
/// Returns an error if storage cannot be cleared.
pub fn logout<S>(storage: &S) -> Result<(), TokenStorageError>
where
    S: TokenStorage + ?Sized,
{
    storage.clear()
}
