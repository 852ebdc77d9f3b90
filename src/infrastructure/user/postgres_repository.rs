//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::{is_unique_violation, storage_error};

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT id, username, created_at FROM users WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to get user"))?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT id, username, created_at FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to get user by username"))?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn create_with_profile(&self, username: &str) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("Failed to begin transaction"))?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (username)
            VALUES ($1)
            RETURNING id, username, created_at
            "#,
        )
        .bind(username)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("Username '{}' already exists", username))
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        let user = row_to_user(&row);

        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
            .bind(user.id().value())
            .execute(&mut *tx)
            .await
            .map_err(storage_error("Failed to create profile"))?;

        tx.commit()
            .await
            .map_err(storage_error("Failed to commit user creation"))?;

        Ok(user)
    }

    async fn create_missing_profiles(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            WITH created AS (
                INSERT INTO profiles (user_id)
                SELECT u.id FROM users u
                WHERE NOT EXISTS (SELECT 1 FROM profiles p WHERE p.user_id = u.id)
                RETURNING user_id
            )
            SELECT u.id, u.username, u.created_at
            FROM users u
            JOIN created c ON c.user_id = u.id
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to create missing profiles"))?;

        Ok(rows.iter().map(row_to_user).collect())
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
    let id: i64 = row.get("id");
    let username: String = row.get("username");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    User::restore(UserId::new(id), username, created_at)
}
