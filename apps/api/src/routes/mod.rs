pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::documents::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/documents/templates",
            get(handlers::handle_list_templates),
        )
        .route("/api/v1/documents/preview", post(handlers::handle_preview))
        .route("/api/v1/documents/resume", post(handlers::handle_resume))
        .route(
            "/api/v1/documents/cover-letter",
            post(handlers::handle_cover_letter),
        )
        .with_state(state)
}
