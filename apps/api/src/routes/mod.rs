pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::export::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Export API
        .route("/api/v1/export/pdf", post(handlers::handle_export_pdf))
        .route("/api/v1/export/flow", post(handlers::handle_export_flow))
        .route("/api/v1/export/filename", post(handlers::handle_file_name))
        .route("/api/v1/export/preview", post(handlers::handle_preview))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
