use thiserror::Error;

/// Core domain errors
///
/// Ownership and friendship scoping failures are reported as `NotFound`;
/// there is deliberately no "forbidden" variant.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Self reference: {message}")]
    SelfReference { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn self_reference(message: impl Into<String>) -> Self {
        Self::SelfReference {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error reports a missing (or out of scope) resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Team '7' not found");
        assert_eq!(error.to_string(), "Not found: Team '7' not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("members[0].species: This field is required");
        assert_eq!(
            error.to_string(),
            "Validation error: members[0].species: This field is required"
        );
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_self_reference_error() {
        let error = DomainError::self_reference("You cannot add yourself as a friend");
        assert_eq!(
            error.to_string(),
            "Self reference: You cannot add yourself as a friend"
        );
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Username 'ash' already exists");
        assert_eq!(error.to_string(), "Conflict: Username 'ash' already exists");
    }
}
