//! Friendship service

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::friendship::{Friend, FriendEdge, FriendList, FriendshipRepository, Profile};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Add, remove and list friends of the calling user
pub struct FriendshipService {
    users: Arc<dyn UserRepository>,
    friendships: Arc<dyn FriendshipRepository>,
}

impl FriendshipService {
    /// Create a new friendship service
    pub fn new(
        users: Arc<dyn UserRepository>,
        friendships: Arc<dyn FriendshipRepository>,
    ) -> Self {
        Self { users, friendships }
    }

    /// Add a friend by username
    ///
    /// Adding someone who is already a friend leaves the graph unchanged and
    /// succeeds.
    pub async fn add_friend(&self, caller: &User, username: &str) -> Result<Friend, DomainError> {
        let friend = self.resolve_user(username).await?;

        if friend.id() == caller.id() {
            warn!(user_id = %caller.id(), "Rejected attempt to add self as friend");
            return Err(DomainError::self_reference(
                "You cannot add yourself as a friend",
            ));
        }

        let edge = self.edge_between(caller, &friend).await?;
        let inserted = self.friendships.add_edge(edge).await?;

        if inserted {
            info!(user_id = %caller.id(), friend_id = %friend.id(), "Friend added");
        } else {
            debug!(user_id = %caller.id(), friend_id = %friend.id(), "Already friends");
        }

        Ok(Friend::from(&friend))
    }

    /// Remove a friend by username
    ///
    /// Removing someone who is not a friend, including the caller, is a no-op.
    pub async fn remove_friend(&self, caller: &User, username: &str) -> Result<(), DomainError> {
        let friend = self.resolve_user(username).await?;

        if friend.id() == caller.id() {
            debug!(user_id = %caller.id(), "Ignoring removal of self as friend");
            return Ok(());
        }

        let edge = self.edge_between(caller, &friend).await?;
        let removed = self.friendships.remove_edge(edge).await?;

        if removed {
            info!(user_id = %caller.id(), friend_id = %friend.id(), "Friend removed");
        } else {
            debug!(user_id = %caller.id(), friend_id = %friend.id(), "Not friends, nothing to remove");
        }

        Ok(())
    }

    /// The caller's profile with every friend resolved to id and username
    pub async fn list_friends(&self, caller: &User) -> Result<FriendList, DomainError> {
        let profile = self.require_profile(caller.id()).await?;
        let friends = self.friendships.friends_of(profile.id()).await?;

        debug!(user_id = %caller.id(), count = friends.len(), "Listed friends");

        Ok(FriendList {
            profile_id: profile.id(),
            user_id: caller.id(),
            username: caller.username().to_string(),
            friends,
        })
    }

    async fn resolve_user(&self, username: &str) -> Result<User, DomainError> {
        self.users
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", username)))
    }

    async fn require_profile(&self, user_id: UserId) -> Result<Profile, DomainError> {
        self.friendships
            .profile_for_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Profile for user '{}' not found", user_id)))
    }

    async fn edge_between(&self, caller: &User, friend: &User) -> Result<FriendEdge, DomainError> {
        let own = self.require_profile(caller.id()).await?;
        let other = self.require_profile(friend.id()).await?;

        FriendEdge::new(own.id(), other.id())
            .map_err(|e| DomainError::self_reference(e.to_string()))
    }
}
