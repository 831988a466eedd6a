//! Suggestion applier: builds a patch describing edits, never mutates the résumé itself.
//!
//! The caller merges the patch with `ResumeData::apply_patch`. Applying is
//! all-or-nothing and deliberately not idempotent: a patch built from a stale
//! report appends the achievement suffix again.

use serde::{Deserialize, Serialize};

use crate::feedback::report::{FeedbackReport, SectionKind};
use crate::models::resume::ResumeData;

/// Overall score above which the summary is left alone.
const SUMMARY_REWRITE_CEILING: u32 = 80;
const SECTION_PATCH_THRESHOLD: f64 = 70.0;
const FALLBACK_YEARS: &str = "3";
const FALLBACK_SKILLS: &str = "technology";

pub const PROPOSED_SKILLS: [&str; 4] = [
    "Problem Solving",
    "Team Leadership",
    "Strategic Planning",
    "Process Improvement",
];

pub const ACHIEVEMENT_SUFFIX: &str = "• Increased team productivity by 25% through streamlined processes and automation. \
     • Delivered projects worth $500K+ on schedule and under budget.";

/// Replacement description for one experience entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceUpdate {
    pub id: String,
    pub description: String,
}

/// `None` fields mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumePatch {
    pub summary: Option<String>,
    /// Not deduplicated here; the merge drops skills the résumé already has.
    pub skills: Option<Vec<String>>,
    pub experience: Option<Vec<ExperienceUpdate>>,
}

impl ResumePatch {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.skills.is_none() && self.experience.is_none()
    }
}

pub fn build_patch(resume: &ResumeData, report: &FeedbackReport) -> ResumePatch {
    let summary = (report.overall_score <= SUMMARY_REWRITE_CEILING).then(|| summary_template(resume));

    let skills = below_threshold(report, SectionKind::Skills)
        .then(|| PROPOSED_SKILLS.iter().map(|s| s.to_string()).collect());

    let experience = below_threshold(report, SectionKind::Experience).then(|| {
        resume
            .experience
            .iter()
            .map(|entry| ExperienceUpdate {
                id: entry.id.clone(),
                description: append_achievements(&entry.description),
            })
            .collect()
    });

    ResumePatch {
        summary,
        skills,
        experience,
    }
}

fn below_threshold(report: &FeedbackReport, kind: SectionKind) -> bool {
    report
        .section_score(kind)
        .is_some_and(|score| score < SECTION_PATCH_THRESHOLD)
}

fn summary_template(resume: &ResumeData) -> String {
    let years = match resume.experience.len() {
        0 => FALLBACK_YEARS.to_string(),
        n => n.to_string(),
    };
    let skills = if resume.skills.is_empty() {
        FALLBACK_SKILLS.to_string()
    } else {
        resume.skills.top(3).join(", ")
    };

    format!(
        "Results-driven professional with {years}+ years of experience delivering high-impact solutions. \
         Proven track record in {skills}, with demonstrated ability to lead cross-functional initiatives \
         and drive measurable business outcomes."
    )
}

fn append_achievements(description: &str) -> String {
    if description.is_empty() {
        ACHIEVEMENT_SUFFIX.to_string()
    } else {
        format!("{description} {ACHIEVEMENT_SUFFIX}")
    }
}
