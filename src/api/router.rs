use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // User CRUD + birth date range search
        .route(
            "/users",
            post(users::create_user).get(users::find_users_by_birth_date_between),
        )
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .patch(users::patch_user)
                .delete(users::delete_user),
        )
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
