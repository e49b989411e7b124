//! Per-request identity.
//!
//! Flow Overview: read the bearer token, verify it, and attach an immutable
//! [`AuthContext`] to the request. A missing or bad token leaves the request
//! unauthenticated; it is never rejected here.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::{AuthError, AuthState};

/// Identity attached to a single request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthContext {
    #[default]
    Unauthenticated,
    Authenticated { user_id: Uuid },
}

impl AuthContext {
    #[must_use]
    pub const fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Authenticated { user_id } => Some(*user_id),
            Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The authenticated user, or `InvalidToken` for handlers that need one.
    ///
    /// # Errors
    /// Returns `InvalidToken` when the request carried no valid token.
    pub fn require(&self) -> Result<Uuid, AuthError> {
        self.user_id().ok_or(AuthError::InvalidToken)
    }

    /// Build the context for a request from its headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, state: &AuthState) -> Self {
        let Some(token) = extract_bearer_token(headers) else {
            return Self::Unauthenticated;
        };
        match state.tokens().verify(&token) {
            Ok(user_id) => Self::Authenticated { user_id },
            Err(err) => {
                debug!("ignoring bearer token: {err}");
                Self::Unauthenticated
            }
        }
    }
}

/// axum middleware attaching an [`AuthContext`] to every request.
pub async fn auth_context(
    State(state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = AuthContext::from_headers(request.headers(), &state);
    request.extensions_mut().insert(context);
    next.run(request).await
}

pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signet::{auth::AuthConfig, store::MemoryUserStore};
    use anyhow::Result;
    use axum::http::HeaderValue;
    use secrecy::SecretString;

    fn state() -> Result<AuthState> {
        Ok(AuthState::new(
            AuthConfig::default(),
            &SecretString::from("0123456789abcdef0123456789abcdef".to_string()),
            Arc::new(MemoryUserStore::new()),
        )?)
    }

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn extract_bearer_token_accepts_any_scheme_case() {
        assert_eq!(
            extract_bearer_token(&headers("Bearer abc")),
            Some("abc".to_string())
        );
        assert_eq!(
            extract_bearer_token(&headers("bearer abc")),
            Some("abc".to_string())
        );
        assert_eq!(
            extract_bearer_token(&headers("  BEARER   abc  ")),
            Some("abc".to_string())
        );
    }

    #[test]
    fn extract_bearer_token_rejects_other_shapes() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
        assert_eq!(extract_bearer_token(&headers("Basic abc")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer   ")), None);
    }

    #[test]
    fn valid_token_authenticates() -> Result<()> {
        let state = state()?;
        let user_id = Uuid::new_v4();
        let token = state.tokens().issue(user_id)?;
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);

        let context = AuthContext::from_headers(&map, &state);
        assert_eq!(context, AuthContext::Authenticated { user_id });
        assert_eq!(context.require()?, user_id);
        Ok(())
    }

    #[test]
    fn missing_or_bad_token_is_unauthenticated() -> Result<()> {
        let state = state()?;
        let context = AuthContext::from_headers(&HeaderMap::new(), &state);
        assert_eq!(context, AuthContext::Unauthenticated);
        assert!(matches!(context.require(), Err(AuthError::InvalidToken)));

        let context = AuthContext::from_headers(&headers("Bearer forged.token.value"), &state);
        assert!(!context.is_authenticated());
        assert_eq!(context.user_id(), None);
        Ok(())
    }
}
