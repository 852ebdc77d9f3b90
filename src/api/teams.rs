//! Team endpoints, scoped to the authenticated caller

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::{Member, Team, TeamDraft, TeamId};

/// Member as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    pub name: Option<String>,
    pub species: String,
    pub level: u32,
    #[serde(rename = "apiId")]
    pub api_id: Option<i64>,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            species: member.species.clone(),
            level: member.level,
            api_id: member.api_id,
        }
    }
}

/// Team as returned to clients; `owner` is the owner's username
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResponse {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub generation: String,
    pub description: String,
    pub members: Vec<MemberResponse>,
    pub favorite: bool,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().value(),
            owner: team.owner_username().to_string(),
            name: team.name().to_string(),
            generation: team.generation().to_string(),
            description: team.description().to_string(),
            members: team.members().iter().map(MemberResponse::from).collect(),
            favorite: team.is_favorite(),
        }
    }
}

/// Parse a path id; anything that is not an integer cannot name a team
pub(crate) fn parse_team_id(raw: &str) -> Result<TeamId, ApiError> {
    raw.parse::<i64>()
        .map(TeamId::new)
        .map_err(|_| ApiError::not_found(format!("Team '{}' not found", raw)))
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    debug!(user_id = %caller.id(), "Listing teams");

    let teams = state.team_service.list(&caller).await?;
    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
    Json(draft): Json<TeamDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let team = state.team_service.create(&caller, draft).await?;
    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// GET /teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    let id = parse_team_id(&team_id)?;
    debug!(user_id = %caller.id(), team_id = %id, "Getting team");

    let team = state.team_service.get(&caller, id).await?;
    Ok(Json(TeamResponse::from(&team)))
}

/// PUT /teams/{team_id}
pub async fn update_team(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
    Path(team_id): Path<String>,
    Json(draft): Json<TeamDraft>,
) -> Result<Json<TeamResponse>, ApiError> {
    let id = parse_team_id(&team_id)?;

    let team = state.team_service.update(&caller, id, draft).await?;
    Ok(Json(TeamResponse::from(&team)))
}

/// DELETE /teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
    Path(team_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_team_id(&team_id)?;

    state.team_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::{MemberId, TeamDetails};
    use crate::domain::user::UserId;

    #[test]
    fn test_team_response_shape() {
        let team = Team::new(
            TeamId::new(3),
            UserId::new(1),
            "ash",
            TeamDetails {
                name: "Gym".to_string(),
                generation: "1".to_string(),
                description: String::new(),
                favorite: false,
            },
            vec![Member {
                id: MemberId::new(9),
                name: None,
                species: "Pidgey".to_string(),
                level: 5,
                api_id: Some(16),
            }],
        );

        let json = serde_json::to_value(TeamResponse::from(&team)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "owner": "ash",
                "name": "Gym",
                "generation": "1",
                "description": "",
                "members": [{"name": null, "species": "Pidgey", "level": 5, "apiId": 16}],
                "favorite": false
            })
        );
    }

    #[test]
    fn test_parse_team_id() {
        assert_eq!(parse_team_id("12").unwrap(), TeamId::new(12));
        assert_eq!(
            parse_team_id("abc").unwrap_err().status,
            StatusCode::NOT_FOUND
        );
    }
}
