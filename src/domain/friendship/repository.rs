//! Friendship graph repository trait

use async_trait::async_trait;

use super::entity::{Friend, FriendEdge, Profile, ProfileId};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for profiles and the undirected friend edge set
///
/// Implementations store one row per edge, so adding or removing an edge is
/// a single atomic write visible from both endpoints.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    /// Get the profile belonging to a user
    async fn profile_for_user(&self, user_id: UserId) -> Result<Option<Profile>, DomainError>;

    /// List the friends of a profile, ordered by username
    async fn friends_of(&self, profile_id: ProfileId) -> Result<Vec<Friend>, DomainError>;

    /// Insert an edge; returns false if it was already present
    async fn add_edge(&self, edge: FriendEdge) -> Result<bool, DomainError>;

    /// Remove an edge; returns false if it was not present
    async fn remove_edge(&self, edge: FriendEdge) -> Result<bool, DomainError>;

    /// Check whether an edge exists
    async fn contains_edge(&self, edge: FriendEdge) -> Result<bool, DomainError>;

    /// Check whether two users are friends; users without a profile have no friends
    async fn are_friends(&self, a: UserId, b: UserId) -> Result<bool, DomainError> {
        let (Some(pa), Some(pb)) = (
            self.profile_for_user(a).await?,
            self.profile_for_user(b).await?,
        ) else {
            return Ok(false);
        };

        match FriendEdge::new(pa.id(), pb.id()) {
            Ok(edge) => self.contains_edge(edge).await,
            Err(_) => Ok(false),
        }
    }
}
