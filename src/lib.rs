//! # Signet (token-based login)
//!
//! `signet` is a small login authority. It checks an email/password pair
//! against stored users, answers with a signed, time-limited token, and
//! resolves that token back into an identity on every later request.
//!
//! ## Tokens
//!
//! Tokens are stateless: the user id and expiry are signed with a single
//! process-wide HMAC secret. There is no revocation list; rotating the secret
//! invalidates every outstanding token.
//!
//! ## Request identity
//!
//! Every API request passes through a middleware that reads
//! `Authorization: Bearer <token>` and attaches an [`signet::auth::AuthContext`]
//! to the request. The middleware never rejects; handlers that need an
//! identity answer `401` themselves.
//!
//! ## Client
//!
//! The [`client`] module holds the login form controller plus the network and
//! storage collaborators it drives. The `signet login` subcommand is built on it.

pub mod cli;
pub mod client;
pub mod signet;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
