//! Store fixtures shared by unit tests.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::{MemoryUserStore, StoreError, User, UserStore};
use crate::signet::auth::hash_password;

/// In-memory store holding a single user named "Ada".
pub(crate) async fn seeded_store(
    email: &str,
    password: &str,
) -> anyhow::Result<(Arc<MemoryUserStore>, Uuid)> {
    let store = Arc::new(MemoryUserStore::new());
    let id = Uuid::new_v4();
    store
        .insert(User {
            id,
            email: email.to_string(),
            password_hash: hash_password(password)?,
            name: "Ada".to_string(),
        })
        .await?;
    Ok((store, id))
}

/// Store whose every call fails as if the database were unreachable.
pub(crate) struct DownStore;

#[async_trait]
impl UserStore for DownStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn insert(&self, _user: User) -> Result<(), StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}
