//! User record store - Data access abstraction.
//!
//! The store is modeled after a document collection: find-by-field and
//! insert, nothing relational. `MemoryStore` is the in-process
//! implementation used for development, demos and tests; a deployment
//! backed by a real document database implements the same trait.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::User;
use crate::errors::AppResult;

/// User store trait for dependency injection.
///
/// Uniqueness of email and mobile is enforced by the caller via
/// check-then-insert; last-writer-wins on races is accepted.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by mobile number
    async fn find_by_mobile(&self, mobile: &str) -> AppResult<Option<User>>;

    /// Insert a new user record
    async fn insert(&self, user: User) -> AppResult<()>;
}

/// In-memory user collection keyed by user ID.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_mobile(&self, mobile: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.mobile.as_deref() == Some(mobile))
            .cloned())
    }

    async fn insert(&self, user: User) -> AppResult<()> {
        self.users.write().await.insert(user.id, user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn sample_user(email: &str, mobile: &str) -> User {
        User::new(
            email.to_string(),
            "hashed".to_string(),
            UserRole::Donor,
            "Sample".to_string(),
            Some(mobile.to_string()),
            None,
        )
    }

    #[tokio::test]
    async fn insert_then_find_by_each_field() {
        let store = MemoryStore::new();
        let user = sample_user("a@x.com", "111");
        let id = user.id;
        store.insert(user).await.unwrap();

        assert!(store.find_by_id(id).await.unwrap().is_some());
        assert!(store.find_by_email("a@x.com").await.unwrap().is_some());
        assert!(store.find_by_mobile("111").await.unwrap().is_some());
        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
        assert!(store.find_by_mobile("222").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn len_tracks_inserts() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.insert(sample_user("a@x.com", "111")).await.unwrap();
        store.insert(sample_user("b@x.com", "222")).await.unwrap();
        assert_eq!(store.len().await, 2);
    }
}
