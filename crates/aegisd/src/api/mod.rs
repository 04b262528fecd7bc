//! HTTP API for the aegisd server.

pub mod health;
pub mod inspection;
pub mod lab;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use health::HealthResponse;
pub use inspection::VerifyRequest;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors_enabled = state.config.cors_enabled;
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health::health))
        .route("/api/lab/submit", post(lab::submit))
        .route("/api/lab/latest", get(lab::latest))
        .route("/api/inspection/verify", post(inspection::verify))
        .route("/api/inspection/report/:id", get(inspection::report))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_enabled {
        app.layer(cors)
    } else {
        app
    }
}
