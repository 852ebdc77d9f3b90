//! User infrastructure module
//!
//! Identity store implementations (in-memory and PostgreSQL) and the user
//! service. Passwords and tokens are handled by the external credential
//! service.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::UserService;
