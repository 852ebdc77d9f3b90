//! Friend endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::teams::TeamResponse;
use crate::api::types::{ApiError, Json};
use crate::domain::friendship::{Friend, FriendList};
use crate::domain::user::UserId;

/// Body of add and remove requests
#[derive(Debug, Clone, Deserialize)]
pub struct FriendRequest {
    pub username: String,
}

/// Caller's profile with friends
#[derive(Debug, Clone, Serialize)]
pub struct FriendListResponse {
    pub id: i64,
    pub user: Friend,
    pub friends: Vec<Friend>,
}

impl From<FriendList> for FriendListResponse {
    fn from(list: FriendList) -> Self {
        Self {
            id: list.profile_id.value(),
            user: Friend {
                id: list.user_id,
                username: list.username,
            },
            friends: list.friends,
        }
    }
}

/// Result of an add or remove request
#[derive(Debug, Clone, Serialize)]
pub struct FriendActionResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend: Option<Friend>,
}

/// GET /friends
pub async fn list_friends(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
) -> Result<Json<FriendListResponse>, ApiError> {
    let list = state.friendship_service.list_friends(&caller).await?;
    Ok(Json(FriendListResponse::from(list)))
}

/// POST /friends/add
pub async fn add_friend(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
    Json(request): Json<FriendRequest>,
) -> Result<Json<FriendActionResponse>, ApiError> {
    let friend = state
        .friendship_service
        .add_friend(&caller, &request.username)
        .await?;

    Ok(Json(FriendActionResponse {
        message: format!("{} added as friend", friend.username),
        friend: Some(friend),
    }))
}

/// DELETE /friends/remove
pub async fn remove_friend(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
    Json(request): Json<FriendRequest>,
) -> Result<Json<FriendActionResponse>, ApiError> {
    state
        .friendship_service
        .remove_friend(&caller, &request.username)
        .await?;

    Ok(Json(FriendActionResponse {
        message: format!("{} removed from friends", request.username),
        friend: None,
    }))
}

/// GET /friends/{user_id}/teams
pub async fn list_friend_teams(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let friend_id = user_id
        .parse::<i64>()
        .map(UserId::new)
        .map_err(|_| ApiError::not_found("Friend not found"))?;

    debug!(user_id = %caller.id(), friend_id = %friend_id, "Listing friend's teams");

    let teams = state
        .team_service
        .list_for_friend(&caller, friend_id)
        .await?;

    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}
