//! Friendship domain module
//!
//! Every user has exactly one profile. Profiles are linked by undirected
//! friend edges: an edge is stored once per unordered pair, so the relation
//! is symmetric by construction and cannot hold duplicates.

mod entity;
mod repository;

pub use entity::{Friend, FriendEdge, FriendEdgeError, FriendList, Profile, ProfileId};
pub use repository::FriendshipRepository;

#[cfg(test)]
pub use repository::MockFriendshipRepository;
