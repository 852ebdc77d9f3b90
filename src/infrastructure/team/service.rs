//! Access-controlled team service
//!
//! Every operation is scoped to the calling user. A team owned by someone
//! else is reported exactly like a team that does not exist.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::friendship::FriendshipRepository;
use crate::domain::team::{Team, TeamDraft, TeamId, TeamRepository};
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

/// Team management on behalf of an authenticated caller
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    friendships: Arc<dyn FriendshipRepository>,
}

impl TeamService {
    /// Create a new team service
    pub fn new(teams: Arc<dyn TeamRepository>, friendships: Arc<dyn FriendshipRepository>) -> Self {
        Self { teams, friendships }
    }

    /// List the caller's teams in insertion order
    pub async fn list(&self, caller: &User) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.list_by_owner(caller.id()).await?;
        debug!(user_id = %caller.id(), count = teams.len(), "Listed teams");
        Ok(teams)
    }

    /// Validate a draft and persist it as a new team owned by the caller
    pub async fn create(&self, caller: &User, draft: TeamDraft) -> Result<Team, DomainError> {
        let team = draft.validate()?;

        info!(
            user_id = %caller.id(),
            name = %team.details.name,
            members = team.members.len(),
            "Creating team"
        );

        let created = self.teams.create(caller.id(), team).await?;
        info!(user_id = %caller.id(), team_id = %created.id(), "Team created");

        Ok(created)
    }

    /// Get one of the caller's teams
    pub async fn get(&self, caller: &User, id: TeamId) -> Result<Team, DomainError> {
        self.require_owned(caller, id).await
    }

    /// Fully replace one of the caller's teams, members included
    ///
    /// Prior members are discarded and recreated from the draft, so member
    /// ids change on every update.
    pub async fn update(
        &self,
        caller: &User,
        id: TeamId,
        draft: TeamDraft,
    ) -> Result<Team, DomainError> {
        self.require_owned(caller, id).await?;
        let team = draft.validate()?;

        info!(user_id = %caller.id(), team_id = %id, members = team.members.len(), "Replacing team");
        self.teams.replace(id, caller.id(), team).await
    }

    /// Delete one of the caller's teams and its members
    pub async fn delete(&self, caller: &User, id: TeamId) -> Result<(), DomainError> {
        self.require_owned(caller, id).await?;

        if !self.teams.delete(id).await? {
            return Err(team_not_found(id));
        }

        info!(user_id = %caller.id(), team_id = %id, "Team deleted");
        Ok(())
    }

    /// List a friend's teams
    ///
    /// Unknown users and users who are not the caller's friend are both
    /// reported as "Friend not found".
    pub async fn list_for_friend(
        &self,
        caller: &User,
        friend_id: UserId,
    ) -> Result<Vec<Team>, DomainError> {
        if !self.friendships.are_friends(caller.id(), friend_id).await? {
            debug!(user_id = %caller.id(), friend_id = %friend_id, "Friend lookup out of scope");
            return Err(DomainError::not_found("Friend not found"));
        }

        let teams = self.teams.list_by_owner(friend_id).await?;
        debug!(
            user_id = %caller.id(),
            friend_id = %friend_id,
            count = teams.len(),
            "Listed friend's teams"
        );

        Ok(teams)
    }

    async fn require_owned(&self, caller: &User, id: TeamId) -> Result<Team, DomainError> {
        self.teams
            .get_owned(id, caller.id())
            .await?
            .ok_or_else(|| team_not_found(id))
    }
}

fn team_not_found(id: TeamId) -> DomainError {
    DomainError::not_found(format!("Team '{}' not found", id))
}
