use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, User, UserStore};

/// Process-local store keyed by id, used by tests and `--dsn memory://`.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<(), StoreError> {
        // Write lock covers the uniqueness check and the insert.
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|existing| existing.email == user.email || existing.id == user.id)
        {
            return Err(StoreError::Duplicate);
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            name: "Ada".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_then_find() -> Result<()> {
        let store = MemoryUserStore::new();
        let ada = user("ada@example.com");
        let id = ada.id;
        store.insert(ada).await?;

        let by_email = store.find_by_email("ada@example.com").await?;
        assert_eq!(by_email.map(|u| u.id), Some(id));
        let by_id = store.find_by_id(id).await?;
        assert_eq!(by_id.map(|u| u.email), Some("ada@example.com".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn email_lookup_is_exact() -> Result<()> {
        let store = MemoryUserStore::new();
        store.insert(user("ada@example.com")).await?;
        assert!(store.find_by_email("ADA@example.com").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_rejected() -> Result<()> {
        let store = MemoryUserStore::new();
        store.insert(user("ada@example.com")).await?;
        let second = store.insert(user("ada@example.com")).await;
        assert!(matches!(second, Err(StoreError::Duplicate)));
        Ok(())
    }
}
