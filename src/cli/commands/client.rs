use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;
use std::{env, path::PathBuf};

pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";

pub const ARG_URL: &str = "url";
pub const ARG_TOKEN_FILE: &str = "token-file";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";

#[must_use]
pub fn login() -> Command {
    with_args(Command::new(CMD_LOGIN).about("Log in and store the issued token"))
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long(ARG_EMAIL)
                .help("Account email")
                .env("SIGNET_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Account password")
                .env("SIGNET_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

#[must_use]
pub fn logout() -> Command {
    with_args(Command::new(CMD_LOGOUT).about("Forget the stored token"))
}

#[must_use]
pub fn whoami() -> Command {
    with_args(Command::new(CMD_WHOAMI).about("Show the user the stored token belongs to"))
}

fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_URL)
                .short('u')
                .long(ARG_URL)
                .help("Base URL of the login API")
                .env("SIGNET_URL")
                .default_value("http://localhost:8080"),
        )
        .arg(
            Arg::new(ARG_TOKEN_FILE)
                .long(ARG_TOKEN_FILE)
                .help("Where the token is kept (default: $HOME/.signet/token)")
                .env("SIGNET_TOKEN_FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub url: String,
    pub token_file: PathBuf,
}

impl Options {
    /// # Errors
    /// Returns an error if no token file is given and `HOME` is unset.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let url = matches
            .get_one::<String>(ARG_URL)
            .cloned()
            .context("missing required argument: --url")?;
        let token_file = match matches.get_one::<PathBuf>(ARG_TOKEN_FILE) {
            Some(path) => path.clone(),
            None => default_token_file()?,
        };
        Ok(Self { url, token_file })
    }
}

pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    /// # Errors
    /// Returns an error if either credential is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let email = matches
            .get_one::<String>(ARG_EMAIL)
            .cloned()
            .context("missing required argument: --email")?;
        let password = matches
            .get_one::<String>(ARG_PASSWORD)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --password")?;
        Ok(Self { email, password })
    }
}

fn default_token_file() -> Result<PathBuf> {
    let home = env::var_os("HOME").context("HOME is not set; pass --token-file")?;
    Ok(PathBuf::from(home).join(".signet").join("token"))
}
