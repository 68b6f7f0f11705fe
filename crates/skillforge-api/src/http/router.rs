//! Axum router configuration with middleware.
//!
//! API routes live under `/api/v1/`; `/health` sits at the root.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/skill-trees/generate",
            post(handlers::skill_tree::generate_skill_tree),
        )
        .route("/skill-trees", get(handlers::skill_tree::list_skill_trees))
        .route("/skill-trees/{id}", get(handlers::skill_tree::get_skill_tree))
        .route("/domains/popular", get(handlers::domain::popular_domains));

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
