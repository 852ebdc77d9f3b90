//! Shared application state for handlers

use std::sync::Arc;

use crate::infrastructure::auth::TokenValidator;
use crate::infrastructure::friendship::FriendshipService;
use crate::infrastructure::team::TeamService;
use crate::infrastructure::user::UserService;

/// Services shared by every request
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub team_service: Arc<TeamService>,
    pub friendship_service: Arc<FriendshipService>,
    pub token_validator: Arc<dyn TokenValidator>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        team_service: Arc<TeamService>,
        friendship_service: Arc<FriendshipService>,
        token_validator: Arc<dyn TokenValidator>,
    ) -> Self {
        Self {
            user_service,
            team_service,
            friendship_service,
            token_validator,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("token_validator", &self.token_validator)
            .finish_non_exhaustive()
    }
}
