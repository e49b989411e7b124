//! Maps parsed arguments to the action the binary runs.

use crate::cli::{
    actions::{client, server, Action},
    commands::{
        client::{Credentials, Options as ClientOptions, CMD_LOGIN, CMD_LOGOUT, CMD_WHOAMI},
        server::{ARG_DSN, ARG_FRONTEND_BASE_URL, ARG_PORT, CMD_SERVER},
        token,
    },
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_SERVER, sub)) => server_args(sub).map(Action::Server),
        Some((CMD_LOGIN, sub)) => {
            let credentials = Credentials::parse(sub)?;
            Ok(Action::Login(client::LoginArgs {
                client: client_args(sub)?,
                email: credentials.email,
                password: credentials.password,
            }))
        }
        Some((CMD_LOGOUT, sub)) => client_args(sub).map(Action::Logout),
        Some((CMD_WHOAMI, sub)) => client_args(sub).map(Action::Whoami),
        _ => Err(anyhow!("missing subcommand")),
    }
}

fn server_args(matches: &ArgMatches) -> Result<server::Args> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --dsn")?;
    let frontend_base_url = matches
        .get_one::<String>(ARG_FRONTEND_BASE_URL)
        .cloned()
        .context("missing required argument: --frontend-base-url")?;
    let token_opts = token::Options::parse(matches)?;

    Ok(server::Args {
        port,
        dsn,
        token_secret: token_opts.secret,
        token_ttl_seconds: token_opts.ttl_seconds,
        frontend_base_url,
    })
}

fn client_args(matches: &ArgMatches) -> Result<client::Args> {
    let options = ClientOptions::parse(matches)?;
    Ok(client::Args {
        url: options.url,
        token_file: options.token_file,
    })
}
