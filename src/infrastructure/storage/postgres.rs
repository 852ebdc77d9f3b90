//! PostgreSQL connection pooling and schema bootstrap

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::domain::DomainError;

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/team_tracker".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }
}

/// Open a connection pool
pub async fn connect(config: &PostgresConfig) -> Result<PgPool, DomainError> {
    info!(
        max_connections = config.max_connections,
        "Connecting to PostgreSQL"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
}

/// Schema statements, applied in order
///
/// Friend edges are stored once per unordered pair (`profile_low < profile_high`).
/// Members cascade with their team, teams and profiles cascade with their user.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username VARCHAR(150) NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS profiles (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS friend_edges (
        profile_low BIGINT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        profile_high BIGINT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        PRIMARY KEY (profile_low, profile_high),
        CHECK (profile_low < profile_high)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS friend_edges_high_idx ON friend_edges (profile_high)",
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id BIGSERIAL PRIMARY KEY,
        owner_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name VARCHAR(100) NOT NULL,
        generation VARCHAR(50) NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        favorite BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS teams_owner_idx ON teams (owner_id)",
    r#"
    CREATE TABLE IF NOT EXISTS members (
        id BIGSERIAL PRIMARY KEY,
        team_id BIGINT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
        name VARCHAR(100),
        species VARCHAR(100) NOT NULL,
        level INTEGER NOT NULL DEFAULT 1 CHECK (level > 0),
        api_id BIGINT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS members_team_idx ON members (team_id)",
];

/// Ensures all tables exist
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DomainError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create schema: {}", e)))?;
    }

    debug!(statements = SCHEMA.len(), "Database schema ensured");
    Ok(())
}

/// Map a sqlx error into a storage error with context
pub(crate) fn storage_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::storage(format!("{}: {}", context, e))
}

/// Check if a sqlx error is a unique constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PostgresConfig::new("postgres://db/teams")
            .with_max_connections(20)
            .with_min_connections(2);

        assert_eq!(config.url, "postgres://db/teams");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout_secs, 30);
    }

    #[test]
    fn test_schema_orders_parents_first() {
        let position = |table: &str| {
            SCHEMA
                .iter()
                .position(|s| s.contains(&format!("CREATE TABLE IF NOT EXISTS {} ", table)))
                .unwrap()
        };

        assert!(position("users") < position("profiles"));
        assert!(position("profiles") < position("friend_edges"));
        assert!(position("users") < position("teams"));
        assert!(position("teams") < position("members"));
    }

    #[test]
    fn test_storage_error_context() {
        let err = storage_error("Failed to load team")(sqlx::Error::RowNotFound);
        assert!(matches!(err, DomainError::Storage { .. }));
        assert!(err.to_string().contains("Failed to load team"));
    }

    #[test]
    fn test_row_not_found_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
