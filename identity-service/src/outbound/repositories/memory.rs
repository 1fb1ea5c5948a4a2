use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::errors::StoreError;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRecord;
use crate::domain::user::ports::UserStore;

/// In-memory user store keyed by user id.
///
/// Backs tests and demo deployments. The write lock makes every
/// single-record operation atomic, so concurrent hash updates for one id
/// serialize instead of merging.
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_user(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }

    async fn insert_user(&self, record: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(record.id.as_str()) {
            return Err(StoreError::AlreadyExists(record.id.to_string()));
        }
        if users.values().any(|existing| existing.email == record.email) {
            return Err(StoreError::AlreadyExists(record.email.to_string()));
        }

        users.insert(record.id.as_str().to_owned(), record);
        Ok(())
    }

    async fn update_hash(&self, id: &UserId, new_hash: String) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        match users.get_mut(id.as_str()) {
            Some(record) => {
                record.password_hash = Some(new_hash);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::user::models::EmailAddress;

    fn record(id: &str, email: &str) -> UserRecord {
        UserRecord::new(
            UserId::new(id.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryUserStore::new();
        store
            .insert_user(record("jaime", "jaime@example.com"))
            .await
            .unwrap();

        let found = store
            .get_user(&UserId::new("jaime".to_string()).unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
        assert!(found.unwrap().password_hash.is_none());

        let missing = store
            .get_user(&UserId::new("nosuchid".to_string()).unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = InMemoryUserStore::new();
        store
            .insert_user(record("jaime", "jaime@example.com"))
            .await
            .unwrap();

        let result = store
            .insert_user(record("jaime", "other@example.com"))
            .await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        store
            .insert_user(record("jaime", "jaime@example.com"))
            .await
            .unwrap();

        let result = store
            .insert_user(record("other", "jaime@example.com"))
            .await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_hash_unknown_user() {
        let store = InMemoryUserStore::new();
        let result = store
            .update_hash(
                &UserId::new("nosuchid".to_string()).unwrap(),
                "$argon2id$hash".to_string(),
            )
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_hash_updates_never_merge() {
        let store = Arc::new(InMemoryUserStore::new());
        store
            .insert_user(record("jaime", "jaime@example.com"))
            .await
            .unwrap();

        let id = UserId::new("jaime".to_string()).unwrap();
        let first = "$argon2id$first".to_string();
        let second = "$argon2id$second".to_string();

        let task_a = {
            let store = store.clone();
            let id = id.clone();
            let hash = first.clone();
            tokio::spawn(async move { store.update_hash(&id, hash).await })
        };
        let task_b = {
            let store = store.clone();
            let id = id.clone();
            let hash = second.clone();
            tokio::spawn(async move { store.update_hash(&id, hash).await })
        };

        task_a.await.unwrap().unwrap();
        task_b.await.unwrap().unwrap();

        let final_hash = store
            .get_user(&id)
            .await
            .unwrap()
            .unwrap()
            .password_hash
            .unwrap();
        // Last write wins in either order; never a corrupted merge
        assert!(final_hash == first || final_hash == second);
    }
}
