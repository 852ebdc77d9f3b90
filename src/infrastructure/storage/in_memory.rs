//! In-memory store shared by the in-memory repositories
//!
//! Useful for testing and development. Data is lost when the process
//! terminates. Every repository operation takes a single lock on all
//! tables, which gives it the same all-or-nothing visibility as a database
//! transaction.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::friendship::{FriendEdge, Profile, ProfileId};
use crate::domain::team::{Member, MemberId, NewMember, Team, TeamDetails, TeamId};
use crate::domain::user::{User, UserId};

/// Stored team row, without members
#[derive(Debug, Clone)]
pub struct TeamRow {
    pub owner_id: UserId,
    pub details: TeamDetails,
}

/// Stored member row, keyed by `(team, member)` in [`Tables::members`]
#[derive(Debug, Clone)]
pub struct MemberRow {
    pub name: Option<String>,
    pub species: String,
    pub level: u32,
    pub api_id: Option<i64>,
}

/// All tables of the in-memory store
///
/// Ids come from per-table sequences and are never reused, so iterating a
/// `BTreeMap` yields rows in insertion order. Members are keyed by team first,
/// so one team's members form a contiguous range ordered by member id.
#[derive(Debug, Default)]
pub struct Tables {
    pub users: BTreeMap<UserId, User>,
    pub profiles: BTreeMap<ProfileId, Profile>,
    pub friend_edges: BTreeSet<FriendEdge>,
    pub teams: BTreeMap<TeamId, TeamRow>,
    pub members: BTreeMap<(TeamId, MemberId), MemberRow>,
    user_seq: i64,
    profile_seq: i64,
    team_seq: i64,
    member_seq: i64,
}

impl Tables {
    pub fn next_user_id(&mut self) -> UserId {
        self.user_seq += 1;
        UserId::new(self.user_seq)
    }

    pub fn next_profile_id(&mut self) -> ProfileId {
        self.profile_seq += 1;
        ProfileId::new(self.profile_seq)
    }

    pub fn next_team_id(&mut self) -> TeamId {
        self.team_seq += 1;
        TeamId::new(self.team_seq)
    }

    pub fn next_member_id(&mut self) -> MemberId {
        self.member_seq += 1;
        MemberId::new(self.member_seq)
    }

    /// Find a user by username
    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|u| u.username() == username)
    }

    /// Find the profile belonging to a user
    pub fn profile_of(&self, user_id: UserId) -> Option<&Profile> {
        self.profiles.values().find(|p| p.user_id() == user_id)
    }

    /// Insert a user with no profile, as imported from a legacy store
    pub fn insert_user_without_profile(&mut self, username: &str) -> User {
        let user = User::new(self.next_user_id(), username);
        self.users.insert(user.id(), user.clone());
        user
    }

    /// Insert a profile for a user
    pub fn insert_profile(&mut self, user_id: UserId) -> Profile {
        let profile = Profile::new(self.next_profile_id(), user_id);
        self.profiles.insert(profile.id(), profile);
        profile
    }

    /// Insert members for a team in order
    pub fn insert_members(&mut self, team_id: TeamId, members: Vec<NewMember>) {
        for member in members {
            let id = self.next_member_id();
            self.members.insert(
                (team_id, id),
                MemberRow {
                    name: member.name,
                    species: member.species,
                    level: member.level,
                    api_id: member.api_id,
                },
            );
        }
    }

    /// Remove every member of a team
    pub fn delete_members(&mut self, team_id: TeamId) {
        let keys: Vec<_> = self
            .members
            .range(member_keys(team_id))
            .map(|(key, _)| *key)
            .collect();

        for key in keys {
            self.members.remove(&key);
        }
    }

    /// Assemble a team with its members and owner username
    pub fn team(&self, id: TeamId) -> Option<Team> {
        let row = self.teams.get(&id)?;
        let owner_username = self
            .users
            .get(&row.owner_id)
            .map(|u| u.username().to_string())
            .unwrap_or_default();

        let members = self
            .members
            .range(member_keys(id))
            .map(|((_, member_id), m)| Member {
                id: *member_id,
                name: m.name.clone(),
                species: m.species.clone(),
                level: m.level,
                api_id: m.api_id,
            })
            .collect();

        Some(Team::new(
            id,
            row.owner_id,
            owner_username,
            row.details.clone(),
            members,
        ))
    }
}

fn member_keys(team_id: TeamId) -> RangeInclusive<(TeamId, MemberId)> {
    (team_id, MemberId::new(i64::MIN))..=(team_id, MemberId::new(i64::MAX))
}

/// Shared handle to the in-memory tables
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
