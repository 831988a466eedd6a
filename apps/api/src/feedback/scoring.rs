//! Scoring engine: ResumeData → FeedbackReport.
//!
//! Default: `RuleTableScorer`, a pure evaluation of the rubrics in `rules.rs`.
//! No wall-clock input is read, so identical résumés always score identically.
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>`; the analysis session registry
//! scores through the same handle.

use tracing::debug;

use crate::feedback::report::{FeedbackReport, SectionScore};
use crate::feedback::rules::RUBRICS;
use crate::feedback::suggestions::suggest;
use crate::models::resume::ResumeData;

const ATS_FLOOR: i64 = 60;
const ATS_PENALTY: i64 = 10;
const ATS_SKILL_BONUS: i64 = 10;
/// Skill count above which the ATS bonus applies.
const ATS_SKILL_THRESHOLD: usize = 10;
const INDUSTRY_FLOOR: i64 = 70;
const INDUSTRY_PENALTY: i64 = 5;

/// Implement this to swap scoring backends without touching handlers or sessions.
pub trait ResumeScorer: Send + Sync {
    fn score(&self, resume: &ResumeData) -> FeedbackReport;
}

pub struct RuleTableScorer;

impl ResumeScorer for RuleTableScorer {
    fn score(&self, resume: &ResumeData) -> FeedbackReport {
        compute_report(resume)
    }
}

/// Returns `None` when there is no résumé to score. Callers are expected to guard this.
pub fn score_resume(
    scorer: &dyn ResumeScorer,
    resume: Option<&ResumeData>,
) -> Option<FeedbackReport> {
    resume.map(|r| scorer.score(r))
}

pub fn compute_report(resume: &ResumeData) -> FeedbackReport {
    let sections: Vec<SectionScore> = RUBRICS
        .iter()
        .map(|rubric| {
            let outcome = rubric.evaluate(resume);
            debug!(
                section = rubric.section.display_name(),
                raw_score = outcome.raw_score,
                fired = ?outcome.fired,
                "Section evaluated"
            );
            SectionScore::new(rubric.section, outcome.raw_score)
        })
        .collect();

    let overall_score = overall_score(&sections);
    let ats_score = ats_score(overall_score, resume.skills.len());
    let industry_match = industry_match(overall_score);

    let mut report = FeedbackReport {
        overall_score,
        sections,
        suggestions: vec![],
        ats_score,
        industry_match,
    };
    report.suggestions = suggest(resume, &report);
    report
}

/// Rounded mean of the (already clamped) section scores.
fn overall_score(sections: &[SectionScore]) -> u32 {
    if sections.is_empty() {
        return 0;
    }
    let sum: f64 = sections.iter().map(|s| s.score.clamp(0.0, 100.0)).sum();
    (sum / sections.len() as f64).round() as u32
}

fn ats_score(overall: u32, skill_count: usize) -> u32 {
    let bonus = if skill_count > ATS_SKILL_THRESHOLD {
        ATS_SKILL_BONUS
    } else {
        0
    };
    (overall as i64 - ATS_PENALTY + bonus).clamp(ATS_FLOOR, 100) as u32
}

fn industry_match(overall: u32) -> u32 {
    (overall as i64 - INDUSTRY_PENALTY).clamp(INDUSTRY_FLOOR, 100) as u32
}
