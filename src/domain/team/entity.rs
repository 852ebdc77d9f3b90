//! Team and member entities

use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Team identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(i64);

impl TeamId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Member identifier, regenerated whenever a team's members are replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A creature record nested inside exactly one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: Option<String>,
    pub species: String,
    pub level: u32,
    pub api_id: Option<i64>,
}

/// Scalar team fields, overwritten as a whole on replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDetails {
    pub name: String,
    pub generation: String,
    pub description: String,
    pub favorite: bool,
}

/// Team entity with its members in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    owner_id: UserId,
    owner_username: String,
    details: TeamDetails,
    members: Vec<Member>,
}

impl Team {
    pub fn new(
        id: TeamId,
        owner_id: UserId,
        owner_username: impl Into<String>,
        details: TeamDetails,
        members: Vec<Member>,
    ) -> Self {
        Self {
            id,
            owner_id,
            owner_username: owner_username.into(),
            details,
            members,
        }
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn owner_username(&self) -> &str {
        &self.owner_username
    }

    pub fn details(&self) -> &TeamDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn generation(&self) -> &str {
        &self.details.generation
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn is_favorite(&self) -> bool {
        self.details.favorite
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Check if the team belongs to the given user
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pidgey() -> Member {
        Member {
            id: MemberId::new(1),
            name: None,
            species: "Pidgey".to_string(),
            level: 5,
            api_id: Some(16),
        }
    }

    fn gym(favorite: bool) -> TeamDetails {
        TeamDetails {
            name: "Gym".to_string(),
            generation: "1".to_string(),
            description: String::new(),
            favorite,
        }
    }

    #[test]
    fn test_team_creation() {
        let team = Team::new(TeamId::new(10), UserId::new(1), "ash", gym(false), vec![pidgey()]);

        assert_eq!(team.id(), TeamId::new(10));
        assert_eq!(team.owner_username(), "ash");
        assert_eq!(team.name(), "Gym");
        assert_eq!(team.generation(), "1");
        assert_eq!(team.description(), "");
        assert!(!team.is_favorite());
        assert_eq!(team.members().len(), 1);
        assert_eq!(team.members()[0].species, "Pidgey");
    }

    #[test]
    fn test_team_ownership() {
        let team = Team::new(TeamId::new(1), UserId::new(1), "ash", gym(true), vec![]);

        assert!(team.is_owned_by(UserId::new(1)));
        assert!(!team.is_owned_by(UserId::new(2)));
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(TeamId::new(3).to_string(), "3");
        assert_eq!(MemberId::new(4).to_string(), "4");
    }
}
