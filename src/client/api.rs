//! Network collaborator for the login form. The HTTP client centralizes the
//! user agent and bearer header so callers never assemble them by hand.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, Response};
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use super::error::ClientError;
use crate::{
    signet::{
        auth::{AuthPayload, ErrorResponse},
        store::UserProfile,
    },
    APP_USER_AGENT,
};

/// Submits credentials and yields the issued token plus user profile.
#[async_trait]
pub trait LoginApi: Send + Sync {
    /// # Errors
    /// Any transport failure or non-success answer.
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ClientError>;
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Clone, Debug)]
pub struct HttpLoginClient {
    base_url: Url,
    http: Client,
}

impl HttpLoginClient {
    /// # Errors
    /// Returns `Config` if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::Config(format!("invalid base URL {base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base URL cannot hold paths: {base_url}"
            )));
        }
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|err| ClientError::Config(err.to_string()))?;
        Ok(Self { base_url, http })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the profile of the user the token belongs to.
    /// Must never log the token.
    ///
    /// # Errors
    /// `Http { status: 401, .. }` when the token is missing, expired, or forged.
    #[instrument(skip_all)]
    pub async fn me(&self, token: &str) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .get(self.endpoint("user/me")?)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        // Keep any prefix already on the base URL.
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }
        base.join(path)
            .map_err(|err| ClientError::Config(format!("invalid endpoint {path}: {err}")))
    }
}

#[async_trait]
impl LoginApi for HttpLoginClient {
    /// Posts to `/user/login`. Must never log the password.
    #[instrument(skip_all)]
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ClientError> {
        let response = self
            .http
            .post(self.endpoint("user/login")?)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    debug!(%status, "request rejected");
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ClientError::Http {
        status: status.as_u16(),
        message,
    })
}
