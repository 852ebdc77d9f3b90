//! Infrastructure layer - storage backends, services and auth

pub mod auth;
pub mod friendship;
pub mod logging;
pub mod storage;
pub mod team;
pub mod user;
