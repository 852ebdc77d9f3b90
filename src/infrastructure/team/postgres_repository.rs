//! PostgreSQL team repository implementation

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::team::{
    Member, MemberId, NewMember, NewTeam, Team, TeamDetails, TeamId, TeamRepository,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::storage::storage_error;

const SNAPSHOT_ISOLATION: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

const TEAM_COLUMNS: &str = r#"
    t.id, t.owner_id, u.username AS owner_username,
    t.name, t.generation, t.description, t.favorite
"#;

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a read-only snapshot
    ///
    /// Team rows and member rows read inside it come from the same committed
    /// state, even if a replace commits between the two statements.
    async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("Failed to begin transaction"))?;

        sqlx::query(SNAPSHOT_ISOLATION)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("Failed to set isolation level"))?;

        Ok(tx)
    }

    /// Load teams matching `filter` with their members from one snapshot
    async fn fetch_teams(&self, filter: &str, binds: &[i64]) -> Result<Vec<Team>, DomainError> {
        let query = format!(
            "SELECT {} FROM teams t JOIN users u ON u.id = t.owner_id WHERE {} ORDER BY t.id",
            TEAM_COLUMNS, filter
        );

        let mut tx = self.begin_snapshot().await?;

        let rows = binds
            .iter()
            .fold(sqlx::query::<Postgres>(&query), |q, value| q.bind(*value))
            .fetch_all(&mut *tx)
            .await
            .map_err(storage_error("Failed to load teams"))?;

        let ids: Vec<i64> = rows.iter().map(|row| row.get("id")).collect();
        let mut members = load_members(&mut tx, &ids).await?;

        tx.commit()
            .await
            .map_err(storage_error("Failed to finish team read"))?;

        Ok(rows
            .iter()
            .map(|row| {
                let id: i64 = row.get("id");
                row_to_team(row, members.remove(&id).unwrap_or_default())
            })
            .collect())
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Team>, DomainError> {
        self.fetch_teams("t.owner_id = $1", &[owner.value()]).await
    }

    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let teams = self.fetch_teams("t.id = $1", &[id.value()]).await?;

        Ok(teams.into_iter().next())
    }

    async fn get_owned(&self, id: TeamId, owner: UserId) -> Result<Option<Team>, DomainError> {
        let teams = self
            .fetch_teams("t.id = $1 AND t.owner_id = $2", &[id.value(), owner.value()])
            .await?;

        Ok(teams.into_iter().next())
    }

    async fn create(&self, owner: UserId, team: NewTeam) -> Result<Team, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("Failed to begin transaction"))?;

        let row = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO teams (owner_id, name, generation, description, favorite)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, owner_id, name, generation, description, favorite
            )
            SELECT i.id, i.owner_id, u.username AS owner_username,
                   i.name, i.generation, i.description, i.favorite
            FROM inserted i
            JOIN users u ON u.id = i.owner_id
            "#,
        )
        .bind(owner.value())
        .bind(&team.details.name)
        .bind(&team.details.generation)
        .bind(&team.details.description)
        .bind(team.details.favorite)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            let is_fk_violation = e
                .as_database_error()
                .map(|db| db.is_foreign_key_violation())
                .unwrap_or(false);

            if is_fk_violation {
                DomainError::not_found(format!("User '{}' not found", owner))
            } else {
                DomainError::storage(format!("Failed to create team: {}", e))
            }
        })?
        .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", owner)))?;

        let id: i64 = row.get("id");
        let members = insert_members(&mut tx, id, team.members).await?;

        tx.commit()
            .await
            .map_err(storage_error("Failed to commit team creation"))?;

        Ok(row_to_team(&row, members))
    }

    async fn replace(
        &self,
        id: TeamId,
        owner: UserId,
        team: NewTeam,
    ) -> Result<Team, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("Failed to begin transaction"))?;

        let row = sqlx::query(
            r#"
            WITH updated AS (
                UPDATE teams
                SET name = $2, generation = $3, description = $4, favorite = $5
                WHERE id = $1 AND owner_id = $6
                RETURNING id, owner_id, name, generation, description, favorite
            )
            SELECT d.id, d.owner_id, u.username AS owner_username,
                   d.name, d.generation, d.description, d.favorite
            FROM updated d
            JOIN users u ON u.id = d.owner_id
            "#,
        )
        .bind(id.value())
        .bind(&team.details.name)
        .bind(&team.details.generation)
        .bind(&team.details.description)
        .bind(team.details.favorite)
        .bind(owner.value())
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error("Failed to update team"))?
        .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))?;

        sqlx::query("DELETE FROM members WHERE team_id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(storage_error("Failed to delete members"))?;

        let members = insert_members(&mut tx, id.value(), team.members).await?;

        tx.commit()
            .await
            .map_err(storage_error("Failed to commit team update"))?;

        Ok(row_to_team(&row, members))
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(storage_error("Failed to delete team"))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Load members for a batch of teams in one query, keyed by team
async fn load_members(
    tx: &mut Transaction<'_, Postgres>,
    team_ids: &[i64],
) -> Result<HashMap<i64, Vec<Member>>, DomainError> {
    let mut by_team: HashMap<i64, Vec<Member>> = HashMap::new();

    if team_ids.is_empty() {
        return Ok(by_team);
    }

    let rows = sqlx::query(
        r#"
        SELECT id, team_id, name, species, level, api_id
        FROM members
        WHERE team_id = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(team_ids)
    .fetch_all(&mut **tx)
    .await
    .map_err(storage_error("Failed to load members"))?;

    for row in rows {
        let team_id: i64 = row.get("team_id");
        by_team.entry(team_id).or_default().push(row_to_member(&row)?);
    }

    Ok(by_team)
}

/// Insert members in order inside an open transaction
async fn insert_members(
    tx: &mut Transaction<'_, Postgres>,
    team_id: i64,
    members: Vec<NewMember>,
) -> Result<Vec<Member>, DomainError> {
    let mut inserted = Vec::with_capacity(members.len());

    for member in members {
        // Draft validation caps levels at i32::MAX.
        let level = i32::try_from(member.level)
            .map_err(|_| DomainError::internal(format!("Unvalidated member level {}", member.level)))?;

        let row = sqlx::query(
            r#"
            INSERT INTO members (team_id, name, species, level, api_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, species, level, api_id
            "#,
        )
        .bind(team_id)
        .bind(&member.name)
        .bind(&member.species)
        .bind(level)
        .bind(member.api_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(storage_error("Failed to insert member"))?;

        inserted.push(row_to_member(&row)?);
    }

    Ok(inserted)
}

fn row_to_team(row: &PgRow, members: Vec<Member>) -> Team {
    let id: i64 = row.get("id");
    let owner_id: i64 = row.get("owner_id");
    let owner_username: String = row.get("owner_username");

    let details = TeamDetails {
        name: row.get("name"),
        generation: row.get("generation"),
        description: row.get("description"),
        favorite: row.get("favorite"),
    };

    Team::new(
        TeamId::new(id),
        UserId::new(owner_id),
        owner_username,
        details,
        members,
    )
}

fn row_to_member(row: &PgRow) -> Result<Member, DomainError> {
    let level: i32 = row.get("level");
    let level = u32::try_from(level)
        .map_err(|_| DomainError::storage(format!("Invalid stored member level {}", level)))?;

    Ok(Member {
        id: MemberId::new(row.get("id")),
        name: row.get("name"),
        species: row.get("species"),
        level,
        api_id: row.get("api_id"),
    })
}
