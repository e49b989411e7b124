use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

use crate::signet::auth::DEFAULT_TOKEN_TTL_SECONDS;

pub const ARG_TOKEN_SECRET: &str = "token-secret";
pub const ARG_TOKEN_TTL_SECONDS: &str = "token-ttl-seconds";

// Mirrors DEFAULT_TOKEN_TTL_SECONDS; clap defaults must be static strings.
const DEFAULT_TTL: &str = "7200";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_TOKEN_SECRET)
                .long(ARG_TOKEN_SECRET)
                .help("HMAC secret used to sign tokens (at least 32 bytes)")
                .long_help(
                    "HMAC secret used to sign tokens (at least 32 bytes). Rotating it invalidates every issued token.",
                )
                .env("SIGNET_TOKEN_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_TTL_SECONDS)
                .long(ARG_TOKEN_TTL_SECONDS)
                .help("Token lifetime in seconds")
                .env("SIGNET_TOKEN_TTL_SECONDS")
                .default_value(DEFAULT_TTL)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

pub struct Options {
    pub secret: SecretString,
    pub ttl_seconds: u64,
}

impl Options {
    /// # Errors
    /// Returns an error if the token secret is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let secret = matches
            .get_one::<String>(ARG_TOKEN_SECRET)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --token-secret")?;
        let ttl_seconds = matches
            .get_one::<u64>(ARG_TOKEN_TTL_SECONDS)
            .copied()
            .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS);
        Ok(Self {
            secret,
            ttl_seconds,
        })
    }
}
