//! Login form controller.
//!
//! Holds what a login screen holds: the two fields, whether the danger banner
//! is showing, and whether a submit is pending. Rendering is left to the
//! caller; the controller only decides state transitions.

use tracing::{info, warn};

use super::{api::LoginApi, error::ClientError, storage::TokenStorage};
use crate::signet::auth::AuthPayload;

/// The only message a failed login ever shows.
pub const ALERT_MESSAGE: &str = "Something went wrong with your login credentials!";

#[derive(Default)]
pub struct LoginForm {
    email: String,
    password: String,
    alert_visible: bool,
    in_flight: bool,
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub const fn alert_visible(&self) -> bool {
        self.alert_visible
    }

    /// Banner text, when the banner is showing.
    #[must_use]
    pub const fn alert(&self) -> Option<&'static str> {
        if self.alert_visible {
            Some(ALERT_MESSAGE)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Gate for the submit button. Not a security boundary.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty() && !self.in_flight
    }

    pub fn dismiss_alert(&mut self) {
        self.alert_visible = false;
    }

    /// Send the credentials and persist the token on success.
    ///
    /// Success clears both fields and hides the banner. Any failure, including
    /// a token that cannot be stored, shows the banner and keeps the fields so
    /// the user can correct them.
    ///
    /// # Errors
    /// `NotReady` without touching state when [`Self::can_submit`] is false;
    /// otherwise the underlying network or storage error.
    pub async fn submit<A, S>(&mut self, api: &A, storage: &S) -> Result<AuthPayload, ClientError>
    where
        A: LoginApi + ?Sized,
        S: TokenStorage + ?Sized,
    {
        if !self.can_submit() {
            return Err(ClientError::NotReady);
        }

        let result = {
            // Cleared on drop, so a cancelled submit cannot wedge the form.
            let _in_flight = InFlight::start(&mut self.in_flight);
            match api.login(&self.email, &self.password).await {
                Ok(payload) => storage.save(&payload.token).map(|()| payload).map_err(Into::into),
                Err(err) => Err(err),
            }
        };

        match result {
            Ok(payload) => {
                info!(user_id = %payload.user.id, "logged in");
                self.email.clear();
                self.password.clear();
                self.alert_visible = false;
                Ok(payload)
            }
            Err(err) => {
                warn!("login failed: {err}");
                self.alert_visible = true;
                Err(err)
            }
        }
    }
}

struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"***")
            .field("alert_visible", &self.alert_visible)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}
