use crate::client::{
    current_token, logout as forget_token, FileTokenStorage, HttpLoginClient, LoginForm,
};
use anyhow::{anyhow, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub url: String,
    pub token_file: PathBuf,
}

#[derive(Debug)]
pub struct LoginArgs {
    pub client: Args,
    pub email: String,
    pub password: SecretString,
}

/// Drive the login form once with the given credentials.
/// # Errors
/// Returns the banner message on any login failure.
pub async fn login(args: LoginArgs) -> Result<()> {
    let api = HttpLoginClient::new(&args.client.url)?;
    let storage = FileTokenStorage::new(args.client.token_file);

    let mut form = LoginForm::new();
    form.set_email(args.email);
    form.set_password(args.password.expose_secret());

    match form.submit(&api, &storage).await {
        Ok(payload) => {
            println!("Logged in as {} <{}>", payload.user.name, payload.user.email);
            Ok(())
        }
        Err(err) => {
            debug!("login error: {err}");
            match form.alert() {
                Some(message) => Err(anyhow!(message)),
                None => Err(err.into()),
            }
        }
    }
}

/// # Errors
/// Returns an error if the token file cannot be removed.
pub fn logout(args: &Args) -> Result<()> {
    forget_token(&FileTokenStorage::new(&args.token_file))
        .with_context(|| format!("Failed to clear {}", args.token_file.display()))?;
    println!("Logged out");
    Ok(())
}

/// # Errors
/// Returns an error if the token file cannot be read or the server is unreachable.
pub async fn whoami(args: Args) -> Result<()> {
    let storage = FileTokenStorage::new(args.token_file);
    let Some(token) = current_token(&storage)? else {
        println!("Not logged in");
        return Ok(());
    };

    let api = HttpLoginClient::new(&args.url)?;
    match api.me(&token).await {
        Ok(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
        Err(err) if err.is_unauthorized() => {
            forget_token(&storage)?;
            println!("Not logged in");
        }
        Err(err) => return Err(err).context("Failed to fetch current user"),
    }

    Ok(())
}
