//! Team draft validation

use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur while validating a single team or member field
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Generation cannot be empty")]
    EmptyGeneration,

    #[error("Generation cannot exceed {0} characters")]
    GenerationTooLong(usize),

    #[error("Species is required")]
    MissingSpecies,

    #[error("Species cannot exceed {0} characters")]
    SpeciesTooLong(usize),

    #[error("Member name cannot exceed {0} characters")]
    MemberNameTooLong(usize),

    #[error("Level must be between 1 and 2147483647, got {0}")]
    InvalidLevel(i64),
}

const MAX_TEAM_NAME_LENGTH: usize = 100;
const MAX_GENERATION_LENGTH: usize = 50;
const MAX_SPECIES_LENGTH: usize = 100;
const MAX_MEMBER_NAME_LENGTH: usize = 100;

/// Highest member level, the range of the `INTEGER` level column
pub const MAX_LEVEL: u32 = i32::MAX as u32;

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a generation tag
pub fn validate_generation(generation: &str) -> Result<(), TeamValidationError> {
    if generation.trim().is_empty() {
        return Err(TeamValidationError::EmptyGeneration);
    }

    if generation.chars().count() > MAX_GENERATION_LENGTH {
        return Err(TeamValidationError::GenerationTooLong(MAX_GENERATION_LENGTH));
    }

    Ok(())
}

/// Validate a member species; blank counts as missing
pub fn validate_species(species: Option<&str>) -> Result<(), TeamValidationError> {
    let species = match species {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Err(TeamValidationError::MissingSpecies),
    };

    if species.chars().count() > MAX_SPECIES_LENGTH {
        return Err(TeamValidationError::SpeciesTooLong(MAX_SPECIES_LENGTH));
    }

    Ok(())
}

/// Validate an optional member display name
pub fn validate_member_name(name: Option<&str>) -> Result<(), TeamValidationError> {
    match name {
        Some(n) if n.chars().count() > MAX_MEMBER_NAME_LENGTH => Err(
            TeamValidationError::MemberNameTooLong(MAX_MEMBER_NAME_LENGTH),
        ),
        _ => Ok(()),
    }
}

/// Validate a member level, defaulting to 1 when absent
pub fn validate_level(level: Option<i64>) -> Result<u32, TeamValidationError> {
    match level {
        None => Ok(1),
        Some(l) if (1..=i64::from(MAX_LEVEL)).contains(&l) => {
            u32::try_from(l).map_err(|_| TeamValidationError::InvalidLevel(l))
        }
        Some(l) => Err(TeamValidationError::InvalidLevel(l)),
    }
}

/// A single problem found in a draft
#[derive(Debug, Clone, PartialEq)]
pub struct DraftIssue {
    /// Index of the offending member, `None` for team-level fields
    pub member: Option<usize>,
    pub field: &'static str,
    pub error: TeamValidationError,
}

impl std::fmt::Display for DraftIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.member {
            Some(index) => write!(f, "members[{}].{}: {}", index, self.field, self.error),
            None => write!(f, "{}: {}", self.field, self.error),
        }
    }
}

/// All problems found while validating a team draft
#[derive(Debug, Clone, PartialEq)]
pub struct DraftValidationError {
    issues: Vec<DraftIssue>,
}

impl DraftValidationError {
    pub fn new(issues: Vec<DraftIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[DraftIssue] {
        &self.issues
    }

    /// Indices of members with at least one issue, ascending and deduplicated
    pub fn member_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.issues.iter().filter_map(|i| i.member).collect();
        indices.dedup();
        indices
    }
}

impl std::fmt::Display for DraftValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for DraftValidationError {}

impl From<DraftValidationError> for DomainError {
    fn from(err: DraftValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}
