//! In-memory friendship graph repository

use async_trait::async_trait;

use crate::domain::friendship::{Friend, FriendEdge, FriendshipRepository, Profile, ProfileId};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::storage::InMemoryStore;

/// In-memory implementation of FriendshipRepository
#[derive(Debug, Clone)]
pub struct InMemoryFriendshipRepository {
    store: InMemoryStore,
}

impl InMemoryFriendshipRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FriendshipRepository for InMemoryFriendshipRepository {
    async fn profile_for_user(&self, user_id: UserId) -> Result<Option<Profile>, DomainError> {
        let tables = self.store.read().await;
        Ok(tables.profile_of(user_id).copied())
    }

    async fn friends_of(&self, profile_id: ProfileId) -> Result<Vec<Friend>, DomainError> {
        let tables = self.store.read().await;

        let mut friends: Vec<Friend> = tables
            .friend_edges
            .iter()
            .filter_map(|edge| edge.other(profile_id))
            .filter_map(|other| tables.profiles.get(&other))
            .filter_map(|profile| tables.users.get(&profile.user_id()))
            .map(Friend::from)
            .collect();

        friends.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(friends)
    }

    async fn add_edge(&self, edge: FriendEdge) -> Result<bool, DomainError> {
        let mut tables = self.store.write().await;

        for endpoint in [edge.low(), edge.high()] {
            if !tables.profiles.contains_key(&endpoint) {
                return Err(DomainError::not_found(format!(
                    "Profile '{}' not found",
                    endpoint
                )));
            }
        }

        Ok(tables.friend_edges.insert(edge))
    }

    async fn remove_edge(&self, edge: FriendEdge) -> Result<bool, DomainError> {
        let mut tables = self.store.write().await;
        Ok(tables.friend_edges.remove(&edge))
    }

    async fn contains_edge(&self, edge: FriendEdge) -> Result<bool, DomainError> {
        let tables = self.store.read().await;
        Ok(tables.friend_edges.contains(&edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRepository;
    use crate::infrastructure::user::InMemoryUserRepository;

    async fn setup(names: &[&str]) -> (InMemoryFriendshipRepository, Vec<Profile>) {
        let store = InMemoryStore::new();
        let users = InMemoryUserRepository::new(store.clone());
        let repo = InMemoryFriendshipRepository::new(store);

        let mut profiles = Vec::new();
        for name in names {
            let user = users.create_with_profile(name).await.unwrap();
            profiles.push(repo.profile_for_user(user.id()).await.unwrap().unwrap());
        }

        (repo, profiles)
    }

    #[tokio::test]
    async fn test_edge_visible_from_both_sides() {
        let (repo, p) = setup(&["ash", "misty"]).await;
        let edge = FriendEdge::new(p[0].id(), p[1].id()).unwrap();

        assert!(repo.add_edge(edge).await.unwrap());

        let ash_friends = repo.friends_of(p[0].id()).await.unwrap();
        let misty_friends = repo.friends_of(p[1].id()).await.unwrap();

        assert_eq!(ash_friends.len(), 1);
        assert_eq!(ash_friends[0].username, "misty");
        assert_eq!(misty_friends.len(), 1);
        assert_eq!(misty_friends[0].username, "ash");
    }

    #[tokio::test]
    async fn test_add_edge_is_idempotent() {
        let (repo, p) = setup(&["ash", "misty"]).await;

        let forward = FriendEdge::new(p[0].id(), p[1].id()).unwrap();
        let backward = FriendEdge::new(p[1].id(), p[0].id()).unwrap();

        assert!(repo.add_edge(forward).await.unwrap());
        assert!(!repo.add_edge(forward).await.unwrap());
        assert!(!repo.add_edge(backward).await.unwrap());
        assert_eq!(repo.friends_of(p[0].id()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_edge() {
        let (repo, p) = setup(&["ash", "misty"]).await;
        let edge = FriendEdge::new(p[0].id(), p[1].id()).unwrap();

        assert!(!repo.remove_edge(edge).await.unwrap());

        repo.add_edge(edge).await.unwrap();
        assert!(repo.remove_edge(edge).await.unwrap());
        assert!(!repo.contains_edge(edge).await.unwrap());
        assert!(repo.friends_of(p[1].id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_friends_sorted_by_username() {
        let (repo, p) = setup(&["ash", "misty", "brock"]).await;

        repo.add_edge(FriendEdge::new(p[0].id(), p[1].id()).unwrap())
            .await
            .unwrap();
        repo.add_edge(FriendEdge::new(p[0].id(), p[2].id()).unwrap())
            .await
            .unwrap();

        let names: Vec<String> = repo
            .friends_of(p[0].id())
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.username)
            .collect();

        assert_eq!(names, vec!["brock", "misty"]);
    }

    #[tokio::test]
    async fn test_add_edge_unknown_profile() {
        let (repo, p) = setup(&["ash"]).await;
        let edge = FriendEdge::new(p[0].id(), ProfileId::new(404)).unwrap();

        let result = repo.add_edge(edge).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_are_friends() {
        let (repo, p) = setup(&["ash", "misty", "brock"]).await;
        repo.add_edge(FriendEdge::new(p[0].id(), p[1].id()).unwrap())
            .await
            .unwrap();

        assert!(repo.are_friends(p[0].user_id(), p[1].user_id()).await.unwrap());
        assert!(repo.are_friends(p[1].user_id(), p[0].user_id()).await.unwrap());
        assert!(!repo.are_friends(p[0].user_id(), p[2].user_id()).await.unwrap());
        assert!(!repo.are_friends(p[0].user_id(), p[0].user_id()).await.unwrap());
        assert!(!repo.are_friends(p[0].user_id(), UserId::new(404)).await.unwrap());
    }
}
