use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::signet::store::StoreError;

/// Failures surfaced by the login flow.
///
/// `AuthenticationFailed` deliberately carries no detail: an unknown email and
/// a wrong password must be indistinguishable to the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    AuthenticationFailed,
    #[error("invalid token")]
    InvalidToken,
    #[error("email already registered")]
    EmailTaken,
    #[error("{0}")]
    InvalidInput(String),
    #[error("upstream failure")]
    UpstreamFailure(#[source] anyhow::Error),
}

impl AuthError {
    pub fn upstream(err: impl Into<anyhow::Error>) -> Self {
        Self::UpstreamFailure(err.into())
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::AuthenticationFailed | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => Self::EmailTaken,
            other => Self::upstream(other),
        }
    }
}

/// JSON body for every error answer.
#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::UpstreamFailure(source) => {
                error!("Upstream failure: {source:#}");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use axum::body::to_bytes;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            AuthError::AuthenticationFailed.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::EmailTaken.status(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidInput("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::upstream(anyhow!("db down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_store_error_becomes_email_taken() {
        assert!(matches!(
            AuthError::from(StoreError::Duplicate),
            AuthError::EmailTaken
        ));
    }

    #[tokio::test]
    async fn upstream_failure_hides_details() -> Result<()> {
        let err = AuthError::upstream(anyhow!("connection refused to 10.0.0.7"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let decoded: ErrorResponse = serde_json::from_slice(&body)?;
        assert_eq!(decoded, ErrorResponse::new("internal error"));
        Ok(())
    }
}
