//! In-memory user repository implementation

use async_trait::async_trait;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::InMemoryStore;

/// In-memory implementation of UserRepository
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

impl InMemoryUserRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let tables = self.store.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let tables = self.store.read().await;
        Ok(tables.user_by_username(username).cloned())
    }

    async fn create_with_profile(&self, username: &str) -> Result<User, DomainError> {
        let mut tables = self.store.write().await;

        if tables.user_by_username(username).is_some() {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let user = tables.insert_user_without_profile(username);
        tables.insert_profile(user.id());

        Ok(user)
    }

    async fn create_missing_profiles(&self) -> Result<Vec<User>, DomainError> {
        let mut tables = self.store.write().await;

        let missing: Vec<User> = tables
            .users
            .values()
            .filter(|u| tables.profile_of(u.id()).is_none())
            .cloned()
            .collect();

        for user in &missing {
            tables.insert_profile(user.id());
        }

        Ok(missing)
    }
}
