pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::editor::handlers as editor_handlers;
use crate::export::handlers as export_handlers;
use crate::feedback::handlers as feedback_handlers;
use crate::state::AppState;

/// Rendered previews are full-page rasters; allow uploads well above axum's 2 MB default.
const MAX_SURFACE_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Feedback API
        .route(
            "/api/v1/feedback/score",
            post(feedback_handlers::handle_score),
        )
        .route(
            "/api/v1/feedback/analyses",
            post(feedback_handlers::handle_start_analysis),
        )
        .route(
            "/api/v1/feedback/analyses/:id",
            get(feedback_handlers::handle_get_analysis)
                .delete(feedback_handlers::handle_close_analysis),
        )
        .route(
            "/api/v1/feedback/apply",
            post(feedback_handlers::handle_apply),
        )
        // Editor API
        .route(
            "/api/v1/resume/edits",
            post(editor_handlers::handle_edit),
        )
        // Export API
        .route(
            "/api/v1/export",
            post(export_handlers::handle_export)
                .layer(DefaultBodyLimit::max(MAX_SURFACE_UPLOAD_BYTES)),
        )
        .with_state(state)
}
