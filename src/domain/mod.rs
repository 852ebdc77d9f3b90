//! Domain layer - Core business logic and entities

pub mod error;
pub mod friendship;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use friendship::{Friend, FriendEdge, FriendList, FriendshipRepository, Profile, ProfileId};
pub use team::{
    Member, MemberDraft, MemberId, NewMember, NewTeam, Team, TeamDetails, TeamDraft, TeamId,
    TeamRepository,
};
pub use user::{User, UserId, UserRepository};
