pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume/analyze", post(handlers::handle_analyze))
        .route("/api/v1/resume", get(handlers::handle_list_analyses))
        .route("/api/v1/resume/:id", get(handlers::handle_get_analysis))
        .route(
            "/api/v1/resume/:id/steps/:step",
            patch(handlers::handle_step_progress),
        )
        .with_state(state)
}
