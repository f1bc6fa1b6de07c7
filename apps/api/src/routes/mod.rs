pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

/// Uploads above this size are rejected at the framework boundary.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/upload_resume", post(handlers::handle_upload))
        .route("/api/resumes", get(handlers::handle_list))
        .route(
            "/api/resume/:id",
            get(handlers::handle_get).delete(handlers::handle_delete),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
