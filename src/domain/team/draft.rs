//! Client-supplied team drafts and their validated form

use serde::Deserialize;

use super::entity::TeamDetails;
use super::validation::{
    validate_generation, validate_level, validate_member_name, validate_species,
    validate_team_name, DraftIssue, DraftValidationError,
};

/// Unvalidated member as supplied by a client
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MemberDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default, rename = "apiId")]
    pub api_id: Option<i64>,
}

impl MemberDraft {
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: Some(species.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_api_id(mut self, api_id: i64) -> Self {
        self.api_id = Some(api_id);
        self
    }
}

/// Unvalidated team as supplied by a client for create or full replace
///
/// `owner` and `id` are not part of the draft: any such fields in a request
/// body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TeamDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub generation: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "isFavorite")]
    pub favorite: bool,
    #[serde(default, alias = "pokemon")]
    pub members: Vec<MemberDraft>,
}

impl TeamDraft {
    pub fn new(name: impl Into<String>, generation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generation: generation.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn with_member(mut self, member: MemberDraft) -> Self {
        self.members.push(member);
        self
    }

    /// Validate every field, collecting all issues instead of stopping at the first
    pub fn validate(self) -> Result<NewTeam, DraftValidationError> {
        let mut issues = Vec::new();

        if let Err(error) = validate_team_name(&self.name) {
            issues.push(DraftIssue {
                member: None,
                field: "name",
                error,
            });
        }

        if let Err(error) = validate_generation(&self.generation) {
            issues.push(DraftIssue {
                member: None,
                field: "generation",
                error,
            });
        }

        let mut members = Vec::with_capacity(self.members.len());

        for (index, draft) in self.members.into_iter().enumerate() {
            let name = draft.name.filter(|n| !n.is_empty());

            if let Err(error) = validate_member_name(name.as_deref()) {
                issues.push(DraftIssue {
                    member: Some(index),
                    field: "name",
                    error,
                });
            }

            if let Err(error) = validate_species(draft.species.as_deref()) {
                issues.push(DraftIssue {
                    member: Some(index),
                    field: "species",
                    error,
                });
            }

            let level = match validate_level(draft.level) {
                Ok(level) => level,
                Err(error) => {
                    issues.push(DraftIssue {
                        member: Some(index),
                        field: "level",
                        error,
                    });
                    continue;
                }
            };

            members.push(NewMember {
                name,
                species: draft.species.unwrap_or_default(),
                level,
                api_id: draft.api_id,
            });
        }

        if !issues.is_empty() {
            return Err(DraftValidationError::new(issues));
        }

        Ok(NewTeam {
            details: TeamDetails {
                name: self.name,
                generation: self.generation,
                description: self.description,
                favorite: self.favorite,
            },
            members,
        })
    }
}

/// Validated member ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: Option<String>,
    pub species: String,
    pub level: u32,
    pub api_id: Option<i64>,
}

/// Validated team ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub details: TeamDetails,
    pub members: Vec<NewMember>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::TeamValidationError;

    #[test]
    fn test_validate_defaults_level() {
        let team = TeamDraft::new("Gym", "1")
            .with_member(MemberDraft::new("Pidgey"))
            .validate()
            .unwrap();

        assert_eq!(team.details.name, "Gym");
        assert_eq!(team.details.description, "");
        assert!(!team.details.favorite);
        assert_eq!(team.members.len(), 1);
        assert_eq!(team.members[0].level, 1);
        assert_eq!(team.members[0].species, "Pidgey");
    }

    #[test]
    fn test_validate_keeps_member_order() {
        let team = TeamDraft::new("Rain", "3")
            .with_member(MemberDraft::new("Pelipper").with_level(50))
            .with_member(MemberDraft::new("Kingdra").with_name("King").with_api_id(230))
            .validate()
            .unwrap();

        let species: Vec<&str> = team.members.iter().map(|m| m.species.as_str()).collect();
        assert_eq!(species, vec!["Pelipper", "Kingdra"]);
        assert_eq!(team.members[1].name.as_deref(), Some("King"));
        assert_eq!(team.members[1].api_id, Some(230));
    }

    #[test]
    fn test_validate_reports_every_member_missing_species() {
        let draft = TeamDraft::new("Gym", "1")
            .with_member(MemberDraft::new("Pidgey"))
            .with_member(MemberDraft::default())
            .with_member(MemberDraft::new("Rattata"))
            .with_member(MemberDraft::default().with_name("Mystery"));

        let err = draft.validate().unwrap_err();

        assert_eq!(err.member_indices(), vec![1, 3]);
        assert!(err
            .issues()
            .iter()
            .all(|i| i.error == TeamValidationError::MissingSpecies));
        assert!(err.to_string().contains("members[1].species"));
        assert!(err.to_string().contains("members[3].species"));
    }

    #[test]
    fn test_validate_rejects_zero_level() {
        let err = TeamDraft::new("Gym", "1")
            .with_member(MemberDraft::new("Pidgey").with_level(0))
            .validate()
            .unwrap_err();

        assert_eq!(err.issues()[0].field, "level");
        assert_eq!(err.issues()[0].error, TeamValidationError::InvalidLevel(0));
    }

    #[test]
    fn test_validate_requires_team_fields() {
        let err = TeamDraft::default().validate().unwrap_err();

        let fields: Vec<&str> = err.issues().iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["name", "generation"]);
        assert!(err.member_indices().is_empty());
    }

    #[test]
    fn test_empty_member_name_becomes_none() {
        let team = TeamDraft::new("Gym", "1")
            .with_member(MemberDraft::new("Pidgey").with_name(""))
            .validate()
            .unwrap();

        assert!(team.members[0].name.is_none());
    }

    #[test]
    fn test_draft_deserialization() {
        let json = r#"{
            "id": 99,
            "owner": "someone-else",
            "name": "Gym",
            "generation": "1",
            "description": "",
            "members": [{"species": "Pidgey", "level": 5, "apiId": 16}],
            "favorite": true
        }"#;

        let draft: TeamDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.name, "Gym");
        assert!(draft.favorite);
        assert_eq!(draft.members.len(), 1);
        assert_eq!(draft.members[0].level, Some(5));
        assert_eq!(draft.members[0].api_id, Some(16));
        assert!(draft.members[0].name.is_none());
    }

    #[test]
    fn test_draft_accepts_legacy_field_names() {
        let json = r#"{
            "name": "Gym",
            "generation": "1",
            "isFavorite": true,
            "pokemon": [{"name": "Birdie", "species": "Pidgey"}]
        }"#;

        let draft: TeamDraft = serde_json::from_str(json).unwrap();
        assert!(draft.favorite);
        assert_eq!(draft.members[0].name.as_deref(), Some("Birdie"));
        assert!(draft.description.is_empty());
    }
}
