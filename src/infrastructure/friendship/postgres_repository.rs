//! PostgreSQL friendship repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::friendship::{Friend, FriendEdge, FriendshipRepository, Profile, ProfileId};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::storage::storage_error;

/// PostgreSQL implementation of FriendshipRepository
#[derive(Debug, Clone)]
pub struct PostgresFriendshipRepository {
    pool: PgPool,
}

impl PostgresFriendshipRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendshipRepository for PostgresFriendshipRepository {
    async fn profile_for_user(&self, user_id: UserId) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query("SELECT id, user_id FROM profiles WHERE user_id = $1")
            .bind(user_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to get profile"))?;

        Ok(row.map(|row| {
            Profile::new(
                ProfileId::new(row.get("id")),
                UserId::new(row.get("user_id")),
            )
        }))
    }

    async fn friends_of(&self, profile_id: ProfileId) -> Result<Vec<Friend>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.username
            FROM friend_edges e
            JOIN profiles p ON p.id = CASE
                WHEN e.profile_low = $1 THEN e.profile_high
                ELSE e.profile_low
            END
            JOIN users u ON u.id = p.user_id
            WHERE e.profile_low = $1 OR e.profile_high = $1
            ORDER BY u.username
            "#,
        )
        .bind(profile_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to list friends"))?;

        Ok(rows
            .into_iter()
            .map(|row| Friend {
                id: UserId::new(row.get("id")),
                username: row.get("username"),
            })
            .collect())
    }

    async fn add_edge(&self, edge: FriendEdge) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO friend_edges (profile_low, profile_high)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(edge.low().value())
        .bind(edge.high().value())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let is_fk_violation = e
                .as_database_error()
                .map(|db| db.is_foreign_key_violation())
                .unwrap_or(false);

            if is_fk_violation {
                DomainError::not_found("Profile not found")
            } else {
                DomainError::storage(format!("Failed to add friend: {}", e))
            }
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_edge(&self, edge: FriendEdge) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM friend_edges WHERE profile_low = $1 AND profile_high = $2",
        )
        .bind(edge.low().value())
        .bind(edge.high().value())
        .execute(&self.pool)
        .await
        .map_err(storage_error("Failed to remove friend"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn contains_edge(&self, edge: FriendEdge) -> Result<bool, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM friend_edges
                WHERE profile_low = $1 AND profile_high = $2
            ) AS present
            "#,
        )
        .bind(edge.low().value())
        .bind(edge.high().value())
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error("Failed to check friendship"))?;

        Ok(row.get("present"))
    }

    async fn are_friends(&self, a: UserId, b: UserId) -> Result<bool, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM profiles pa
                JOIN profiles pb ON pb.user_id = $2
                JOIN friend_edges e
                    ON e.profile_low = LEAST(pa.id, pb.id)
                   AND e.profile_high = GREATEST(pa.id, pb.id)
                WHERE pa.user_id = $1
            ) AS present
            "#,
        )
        .bind(a.value())
        .bind(b.value())
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error("Failed to check friendship"))?;

        Ok(row.get("present"))
    }
}
