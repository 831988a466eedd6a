//! Axum route handlers for the Feedback API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::apply::{build_patch, ResumePatch};
use crate::feedback::report::FeedbackReport;
use crate::feedback::scoring::score_resume;
use crate::feedback::session::{AnalysisState, CloseOutcome};
use crate::models::resume::ResumeData;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `resume` may be missing or null on the wire; that is a precondition failure,
/// reported as such rather than as a deserialization error.
#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    #[serde(default)]
    pub resume: Option<ResumeData>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub report: FeedbackReport,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub state: AnalysisState,
}

#[derive(Debug, Deserialize)]
pub struct WaitQuery {
    #[serde(default)]
    pub wait: bool,
}

#[derive(Debug, Serialize)]
pub struct CloseResponse {
    pub session_id: Uuid,
    pub status: &'static str,
    pub outcome: CloseOutcome,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub resume: Option<ResumeData>,
    pub report: FeedbackReport,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub patch: ResumePatch,
    pub resume: ResumeData,
}

fn missing_resume() -> AppError {
    AppError::Precondition("resume data is required".to_string())
}

pub(crate) fn require_resume(resume: Option<ResumeData>) -> Result<ResumeData, AppError> {
    let resume = resume.ok_or_else(missing_resume)?;
    resume.validate()?;
    Ok(resume)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/feedback/score
///
/// Scores immediately, without the analysis delay.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    if let Some(resume) = &request.resume {
        resume.validate()?;
    }
    let report = score_resume(state.scorer.as_ref(), request.resume.as_ref())
        .ok_or_else(missing_resume)?;
    Ok(Json(ScoreResponse { report }))
}

/// POST /api/v1/feedback/analyses
pub async fn handle_start_analysis(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<(StatusCode, Json<AnalysisResponse>), AppError> {
    let resume = require_resume(request.resume)?;
    let session_id = state.analyses.start(resume).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(AnalysisResponse {
            session_id,
            state: AnalysisState::Analyzing,
        }),
    ))
}

/// GET /api/v1/feedback/analyses/:id[?wait=true]
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<WaitQuery>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let analysis = if query.wait {
        state.analyses.wait(session_id).await?
    } else {
        state.analyses.status(session_id).await?
    };
    Ok(Json(AnalysisResponse {
        session_id,
        state: analysis,
    }))
}

/// DELETE /api/v1/feedback/analyses/:id
pub async fn handle_close_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CloseResponse>, AppError> {
    let outcome = state.analyses.close(session_id).await?;
    Ok(Json(CloseResponse {
        session_id,
        status: "closed",
        outcome,
    }))
}

/// POST /api/v1/feedback/apply
///
/// Builds the suggestion patch from the supplied report and returns it together
/// with the merged résumé. Nothing is stored.
pub async fn handle_apply(
    Json(request): Json<ApplyRequest>,
) -> Result<Json<ApplyResponse>, AppError> {
    let mut resume = require_resume(request.resume)?;
    request.report.validate()?;
    let patch = build_patch(&resume, &request.report);
    resume.apply_patch(&patch);
    Ok(Json(ApplyResponse { patch, resume }))
}
