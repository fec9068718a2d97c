use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recommendations",
            post(handlers::generate).get(handlers::current_recommendations),
        )
        .route(
            "/users/:user_id/preferences",
            get(handlers::get_preferences).put(handlers::put_preferences),
        )
        .route(
            "/users/:user_id/subscription",
            get(handlers::get_subscription),
        )
}
