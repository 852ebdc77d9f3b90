//! Friendship infrastructure module
//!
//! Friend graph repositories (in-memory and PostgreSQL) and the service
//! behind the add, remove and list operations.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresFriendshipRepository;
pub use repository::InMemoryFriendshipRepository;
pub use service::FriendshipService;
