//! User domain
//!
//! Users are owned by the external credential service; this crate only knows
//! their id and username. Creating a user always creates its profile.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_username, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
