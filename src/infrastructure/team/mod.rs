//! Team infrastructure module
//!
//! Team repositories (in-memory and PostgreSQL) and the access-controlled
//! team service.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresTeamRepository;
pub use repository::InMemoryTeamRepository;
pub use service::TeamService;
