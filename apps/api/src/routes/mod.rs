pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

/// Room for multipart boundaries, part headers and the optional form JSON.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Request body ceiling for a given file-size limit. Saturates at `usize::MAX`.
fn request_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = request_body_limit(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume/extract", post(handlers::handle_extract))
        .route("/api/v1/resume/parse", post(handlers::handle_parse))
        .route("/api/v1/resume/autofill", post(handlers::handle_autofill))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
