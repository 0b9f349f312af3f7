//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Planner session
        .route("/planner", get(handlers::get_planner))
        .route("/planner/subjects", post(handlers::add_subject))
        .route("/planner/subjects/{name}", axum::routing::delete(handlers::remove_subject))
        .route("/planner/hours", put(handlers::set_hours))
        .route("/planner/schedule", post(handlers::generate_schedule))
        .route("/planner/schedule/save", post(handlers::save_schedule))
        // Daily trackers
        .route("/mood", post(handlers::log_mood))
        .route("/mood/trend", get(handlers::get_mood_trend))
        .route("/habits", get(handlers::list_habits))
        .route("/habits", post(handlers::add_habit))
        .route("/habits/{habit_id}/complete", post(handlers::complete_habit))
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        // Records
        .route("/records", get(handlers::get_records))
        .route(
            "/records/moods/{id}",
            put(handlers::update_mood).delete(handlers::delete_mood),
        )
        .route(
            "/records/completions/{id}",
            put(handlers::update_completion).delete(handlers::delete_completion),
        )
        .route(
            "/records/sessions/{id}",
            put(handlers::update_session).delete(handlers::delete_session),
        );

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
