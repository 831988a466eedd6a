// Résumé feedback: rule-table scoring, suggestions, suggestion patches,
// and the delayed analysis sessions that present them.

pub mod apply;
pub mod handlers;
pub mod report;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod suggestions;

pub use scoring::{ResumeScorer, RuleTableScorer};
pub use session::AnalysisSessions;
