//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for the identity store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a user together with its profile in a single transaction
    ///
    /// Fails with `Conflict` when the username is taken.
    async fn create_with_profile(&self, username: &str) -> Result<User, DomainError>;

    /// Create profiles for users that do not have one, returning those users
    async fn create_missing_profiles(&self) -> Result<Vec<User>, DomainError>;
}
