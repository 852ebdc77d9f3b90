use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::friends;
use super::health;
use super::state::AppState;
use super::teams;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Teams owned by the caller
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/{team_id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        // Friend graph
        .route("/friends", get(friends::list_friends))
        .route("/friends/add", post(friends::add_friend))
        .route("/friends/remove", delete(friends::remove_friend))
        .route("/friends/{user_id}/teams", get(friends::list_friend_teams))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
