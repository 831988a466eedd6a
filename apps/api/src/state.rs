use std::sync::Arc;

use crate::config::Config;
use crate::export::ExportPipeline;
use crate::feedback::{AnalysisSessions, ResumeScorer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable scorer. Default: RuleTableScorer.
    pub scorer: Arc<dyn ResumeScorer>,
    /// Delayed analyses; scores through the same scorer.
    pub analyses: Arc<AnalysisSessions>,
    /// Single-flight export pipeline over the rendered preview surface.
    pub exporter: Arc<ExportPipeline>,
}

impl AppState {
    pub fn new(config: Config, scorer: Arc<dyn ResumeScorer>) -> Self {
        let analyses = Arc::new(AnalysisSessions::new(
            Arc::clone(&scorer),
            config.analysis_delay(),
            config.analysis_retention(),
        ));
        let exporter = Arc::new(ExportPipeline::new(config.page_geometry()));
        Self {
            config,
            scorer,
            analyses,
            exporter,
        }
    }
}
