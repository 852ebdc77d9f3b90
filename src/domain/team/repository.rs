//! Team repository trait

use async_trait::async_trait;

use super::draft::NewTeam;
use super::entity::{Team, TeamId};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for teams and their nested members
///
/// `create` and `replace` persist the team row and its member rows as one
/// atomic unit: readers never see a partially written member set.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// List a user's teams in insertion order, members included
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Team>, DomainError>;

    /// Get a team by ID regardless of owner
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Get a team by ID only if it belongs to `owner`
    async fn get_owned(&self, id: TeamId, owner: UserId) -> Result<Option<Team>, DomainError>;

    /// Persist a new team and its members for `owner`
    async fn create(&self, owner: UserId, team: NewTeam) -> Result<Team, DomainError>;

    /// Overwrite all scalar fields and recreate the member set from scratch
    ///
    /// Existing members are deleted and fresh ones inserted, so member ids are
    /// not stable across a replace. Fails with `NotFound` if the team is gone
    /// or is not owned by `owner`.
    async fn replace(
        &self,
        id: TeamId,
        owner: UserId,
        team: NewTeam,
    ) -> Result<Team, DomainError>;

    /// Delete a team and its members; returns false if it did not exist
    async fn delete(&self, id: TeamId) -> Result<bool, DomainError>;
}
