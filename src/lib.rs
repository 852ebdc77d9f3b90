//! Team Tracker API
//!
//! Users keep teams of creature records, friend each other, and browse
//! their friends' teams:
//! - Per-owner team CRUD with nested members replaced atomically
//! - A symmetric friend graph stored as undirected edges
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{DomainError, FriendshipRepository, TeamRepository, UserRepository};
use infrastructure::{
    auth::{JwtService, TokenValidator},
    friendship::{FriendshipService, InMemoryFriendshipRepository, PostgresFriendshipRepository},
    storage::{self, InMemoryStore},
    team::{InMemoryTeamRepository, PostgresTeamRepository, TeamService},
    user::{InMemoryUserRepository, PostgresUserRepository, UserService},
};
use tracing::{info, warn};

/// Create the application state from configuration
///
/// Uses PostgreSQL when `database.url` is set, the in-memory store otherwise.
/// The in-memory store starts with the users listed in `database.seed_users`.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let token_validator: Arc<dyn TokenValidator> = Arc::new(JwtService::new(config.auth.jwt()));

    let Some(postgres) = config.database.postgres() else {
        warn!("No database URL configured, using in-memory storage");
        let state = create_in_memory_state(token_validator);
        seed_users(&state, &config.database.seed_users).await?;
        return Ok(state);
    };

    if !config.database.seed_users.is_empty() {
        warn!("database.seed_users only applies to in-memory storage, ignoring");
    }

    let pool = storage::connect(&postgres).await?;
    storage::ensure_schema(&pool).await?;
    info!("PostgreSQL storage ready");

    Ok(build_state(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresTeamRepository::new(pool.clone())),
        Arc::new(PostgresFriendshipRepository::new(pool)),
        token_validator,
    ))
}

/// Create application state backed by a fresh in-memory store
pub fn create_in_memory_state(token_validator: Arc<dyn TokenValidator>) -> AppState {
    let store = InMemoryStore::new();

    build_state(
        Arc::new(InMemoryUserRepository::new(store.clone())),
        Arc::new(InMemoryTeamRepository::new(store.clone())),
        Arc::new(InMemoryFriendshipRepository::new(store)),
        token_validator,
    )
}

async fn seed_users(state: &AppState, usernames: &[String]) -> anyhow::Result<()> {
    for username in usernames {
        match state.user_service.register(username).await {
            Ok(user) => info!(user_id = %user.id(), username = %username, "Seeded user"),
            Err(DomainError::Conflict { .. }) => {
                warn!(username = %username, "Seed user listed twice, skipping")
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn build_state(
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
    friendships: Arc<dyn FriendshipRepository>,
    token_validator: Arc<dyn TokenValidator>,
) -> AppState {
    AppState::new(
        Arc::new(UserService::new(users.clone())),
        Arc::new(TeamService::new(teams, friendships.clone())),
        Arc::new(FriendshipService::new(users, friendships)),
        token_validator,
    )
}
