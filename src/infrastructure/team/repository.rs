//! In-memory team repository implementation

use async_trait::async_trait;

use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::storage::{InMemoryStore, TeamRow};

/// In-memory implementation of TeamRepository
///
/// Each write takes the store's write lock once, so a team and its member set
/// are always written together.
#[derive(Debug, Clone)]
pub struct InMemoryTeamRepository {
    store: InMemoryStore,
}

impl InMemoryTeamRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Team>, DomainError> {
        let tables = self.store.read().await;

        Ok(tables
            .teams
            .iter()
            .filter(|(_, row)| row.owner_id == owner)
            .filter_map(|(id, _)| tables.team(*id))
            .collect())
    }

    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let tables = self.store.read().await;
        Ok(tables.team(id))
    }

    async fn get_owned(&self, id: TeamId, owner: UserId) -> Result<Option<Team>, DomainError> {
        let tables = self.store.read().await;
        Ok(tables.team(id).filter(|team| team.is_owned_by(owner)))
    }

    async fn create(&self, owner: UserId, team: NewTeam) -> Result<Team, DomainError> {
        let mut tables = self.store.write().await;

        if !tables.users.contains_key(&owner) {
            return Err(DomainError::not_found(format!("User '{}' not found", owner)));
        }

        let id = tables.next_team_id();
        tables.teams.insert(
            id,
            TeamRow {
                owner_id: owner,
                details: team.details,
            },
        );
        tables.insert_members(id, team.members);

        tables
            .team(id)
            .ok_or_else(|| DomainError::internal(format!("Team '{}' vanished after insert", id)))
    }

    async fn replace(
        &self,
        id: TeamId,
        owner: UserId,
        team: NewTeam,
    ) -> Result<Team, DomainError> {
        let mut tables = self.store.write().await;

        let row = tables
            .teams
            .get_mut(&id)
            .filter(|row| row.owner_id == owner)
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))?;
        row.details = team.details;

        tables.delete_members(id);
        tables.insert_members(id, team.members);

        tables
            .team(id)
            .ok_or_else(|| DomainError::internal(format!("Team '{}' vanished after replace", id)))
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let mut tables = self.store.write().await;

        if tables.teams.remove(&id).is_none() {
            return Ok(false);
        }

        tables.delete_members(id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::{MemberDraft, TeamDraft};
    use crate::domain::user::UserRepository;
    use crate::infrastructure::user::InMemoryUserRepository;

    async fn setup() -> (InMemoryTeamRepository, InMemoryStore, UserId, UserId) {
        let store = InMemoryStore::new();
        let users = InMemoryUserRepository::new(store.clone());
        let ash = users.create_with_profile("ash").await.unwrap();
        let misty = users.create_with_profile("misty").await.unwrap();

        (
            InMemoryTeamRepository::new(store.clone()),
            store,
            ash.id(),
            misty.id(),
        )
    }

    fn gym() -> NewTeam {
        TeamDraft::new("Gym", "1")
            .with_member(MemberDraft::new("Pidgey").with_level(5))
            .with_member(MemberDraft::new("Rattata"))
            .validate()
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (repo, _, ash, _) = setup().await;

        let created = repo.create(ash, gym()).await.unwrap();
        let fetched = repo.get(created.id()).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.owner_username(), "ash");
        assert_eq!(fetched.members().len(), 2);
        assert_eq!(fetched.members()[0].level, 5);
        assert_eq!(fetched.members()[1].level, 1);
    }

    #[tokio::test]
    async fn test_create_for_unknown_owner() {
        let (repo, store, _, _) = setup().await;

        let result = repo.create(UserId::new(404), gym()).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(store.read().await.teams.is_empty());
        assert!(store.read().await.members.is_empty());
    }

    #[tokio::test]
    async fn test_get_owned_scopes_by_owner() {
        let (repo, _, ash, misty) = setup().await;
        let team = repo.create(ash, gym()).await.unwrap();

        assert!(repo.get_owned(team.id(), ash).await.unwrap().is_some());
        assert!(repo.get_owned(team.id(), misty).await.unwrap().is_none());
        assert!(repo.get_owned(TeamId::new(404), ash).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_owner_in_insertion_order() {
        let (repo, _, ash, misty) = setup().await;

        repo.create(ash, TeamDraft::new("Zephyr", "2").validate().unwrap())
            .await
            .unwrap();
        repo.create(misty, TeamDraft::new("Cascade", "1").validate().unwrap())
            .await
            .unwrap();
        repo.create(ash, gym()).await.unwrap();

        let teams = repo.list_by_owner(ash).await.unwrap();
        let names: Vec<&str> = teams.iter().map(|t| t.name()).collect();

        assert_eq!(names, vec!["Zephyr", "Gym"]);
        assert_eq!(teams[1].members().len(), 2);
    }

    #[tokio::test]
    async fn test_replace_regenerates_members() {
        let (repo, store, ash, _) = setup().await;
        let team = repo.create(ash, gym()).await.unwrap();
        let old_ids: Vec<_> = team.members().iter().map(|m| m.id).collect();

        let draft = TeamDraft::new("Elite", "2")
            .with_description("Final four")
            .with_favorite(true)
            .with_member(MemberDraft::new("Pidgeot").with_level(36));
        let replaced = repo
            .replace(team.id(), ash, draft.validate().unwrap())
            .await
            .unwrap();

        assert_eq!(replaced.id(), team.id());
        assert_eq!(replaced.name(), "Elite");
        assert_eq!(replaced.description(), "Final four");
        assert!(replaced.is_favorite());
        assert_eq!(replaced.members().len(), 1);
        assert!(!old_ids.contains(&replaced.members()[0].id));
        assert_eq!(store.read().await.members.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_missing_team() {
        let (repo, _, ash, _) = setup().await;

        let result = repo.replace(TeamId::new(404), ash, gym()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_replace_by_other_owner_leaves_team_untouched() {
        let (repo, _, ash, misty) = setup().await;
        let team = repo.create(ash, gym()).await.unwrap();

        let draft = TeamDraft::new("Cerulean", "1").validate().unwrap();
        let result = repo.replace(team.id(), misty, draft).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(repo.get(team.id()).await.unwrap().unwrap(), team);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_members() {
        let (repo, store, ash, _) = setup().await;
        let keep = repo.create(ash, gym()).await.unwrap();
        let doomed = repo.create(ash, gym()).await.unwrap();

        assert!(repo.delete(doomed.id()).await.unwrap());
        assert!(!repo.delete(doomed.id()).await.unwrap());

        let tables = store.read().await;
        assert!(tables.members.keys().all(|(team_id, _)| *team_id == keep.id()));
        assert_eq!(tables.members.len(), 2);
    }
}
