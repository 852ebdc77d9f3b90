//! Storage backends shared by the repositories
//!
//! - `InMemoryStore`: one lock over every table, for development and tests
//! - PostgreSQL: pooled connections and schema bootstrap

mod in_memory;
mod postgres;

pub use in_memory::{InMemoryStore, MemberRow, Tables, TeamRow};
pub use postgres::{connect, ensure_schema, PostgresConfig};
pub(crate) use postgres::{is_unique_violation, storage_error};
