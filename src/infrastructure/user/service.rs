//! User service for the identity store

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{validate_username, User, UserId, UserRepository};
use crate::domain::DomainError;

/// Identity lookups and user registration
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new user service
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Register a user; its profile is created in the same transaction
    pub async fn register(&self, username: &str) -> Result<User, DomainError> {
        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;

        info!(username = %username, "Registering user");
        let user = self.repository.create_with_profile(username).await?;
        info!(user_id = %user.id(), "User registered with profile");

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// Create profiles for users that predate automatic profile creation
    pub async fn backfill_profiles(&self) -> Result<Vec<User>, DomainError> {
        let users = self.repository.create_missing_profiles().await?;

        if users.is_empty() {
            debug!("All users already have profiles");
        } else {
            info!(count = users.len(), "Created missing profiles");
        }

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::storage::InMemoryStore;
    use crate::infrastructure::user::InMemoryUserRepository;

    fn create_service() -> (UserService, InMemoryStore) {
        let store = InMemoryStore::new();
        let repository = Arc::new(InMemoryUserRepository::new(store.clone()));
        (UserService::new(repository), store)
    }

    #[tokio::test]
    async fn test_register_creates_profile() {
        let (service, store) = create_service();

        let user = service.register("ash").await.unwrap();

        assert_eq!(user.username(), "ash");
        assert!(store.read().await.profile_of(user.id()).is_some());
    }

    #[tokio::test]
    async fn test_register_invalid_username() {
        let (service, store) = create_service();

        let result = service.register("ash ketchum").await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(store.read().await.users.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (service, _) = create_service();

        service.register("ash").await.unwrap();
        let result = service.register("ash").await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_backfill_profiles() {
        let (service, store) = create_service();
        service.register("ash").await.unwrap();
        store.write().await.insert_user_without_profile("gary");
        store.write().await.insert_user_without_profile("brock");

        let created = service.backfill_profiles().await.unwrap();
        let names: Vec<&str> = created.iter().map(|u| u.username()).collect();

        assert_eq!(names, vec!["gary", "brock"]);
        assert!(service.backfill_profiles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_create_with_profile()
            .returning(|_| Err(DomainError::storage("connection reset")));

        let service = UserService::new(Arc::new(repository));
        let result = service.register("ash").await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
