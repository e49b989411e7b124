use crate::{
    cli::globals::GlobalArgs,
    signet::{
        self,
        auth::{AuthConfig, AuthState},
        store::{MemoryUserStore, PgUserStore, UserStore},
    },
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

const MEMORY_DSN_PREFIX: &str = "memory://";

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: SecretString,
    pub token_secret: SecretString,
    pub token_ttl_seconds: u64,
    pub frontend_base_url: String,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the store cannot be reached, the token secret is
/// rejected, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let globals = GlobalArgs::new(args.dsn, args.token_secret);

    debug!("Global args: {:?}", globals);

    let store = connect(globals.dsn.expose_secret()).await?;

    let auth_config =
        AuthConfig::new(args.frontend_base_url).with_token_ttl_seconds(args.token_ttl_seconds);

    let auth_state = AuthState::new(auth_config, &globals.token_secret, store)
        .context("Failed to initialize auth state")?;

    signet::new(args.port, Arc::new(auth_state)).await
}

async fn connect(dsn: &str) -> Result<Arc<dyn UserStore>> {
    if dsn.starts_with(MEMORY_DSN_PREFIX) {
        warn!("Using in-memory user store; users are lost on exit");
        return Ok(Arc::new(MemoryUserStore::new()));
    }

    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 30))
        .test_before_acquire(true)
        .connect(dsn)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database");

    Ok(Arc::new(PgUserStore::new(pool)))
}
