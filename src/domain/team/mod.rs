//! Team domain module
//!
//! A team is an owned, named collection of members ("pokemon"). Members only
//! exist inside their team: replacing a team's member list or deleting the
//! team removes them.

mod draft;
mod entity;
mod repository;
mod validation;

pub use draft::{MemberDraft, NewMember, NewTeam, TeamDraft};
pub use entity::{Member, MemberId, Team, TeamDetails, TeamId};
pub use repository::TeamRepository;
pub use validation::{
    validate_generation, validate_level, validate_member_name, validate_species,
    validate_team_name, DraftIssue, DraftValidationError, TeamValidationError,
};

#[cfg(test)]
pub use repository::MockTeamRepository;
