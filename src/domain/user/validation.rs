//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username contains invalid character: '{0}'. Only letters, digits and @/./+/-/_ are allowed")]
    InvalidUsernameCharacter(char),
}

const MAX_USERNAME_LENGTH: usize = 150;

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - Maximum 150 characters
/// - Letters, digits and `@`, `.`, `+`, `-`, `_`
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    if let Some(c) = username
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')))
    {
        return Err(UserValidationError::InvalidUsernameCharacter(c));
    }

    Ok(())
}
