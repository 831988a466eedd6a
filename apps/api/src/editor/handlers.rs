//! Axum route handlers for the Editor API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::editor::{apply_edits, ResumeEdit};
use crate::errors::AppError;
use crate::feedback::handlers::require_resume;
use crate::models::resume::ResumeData;

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub resume: Option<ResumeData>,
    #[serde(default)]
    pub edits: Vec<ResumeEdit>,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub resume: ResumeData,
    pub applied: usize,
}

/// POST /api/v1/resume/edits
///
/// Applies the edits in order and returns the edited résumé. Nothing is stored.
pub async fn handle_edit(Json(request): Json<EditRequest>) -> Result<Json<EditResponse>, AppError> {
    let mut resume = require_resume(request.resume)?;
    let applied = apply_edits(&mut resume, &request.edits)?;
    Ok(Json(EditResponse { resume, applied }))
}
