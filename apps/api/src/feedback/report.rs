use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const ALL_SECTIONS: [SectionKind; 4] = [
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Skills,
    SectionKind::Education,
];

/// The four fixed sections that feed the overall score.
/// Serialized as their display names, which are part of the report contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    #[serde(rename = "Professional Summary")]
    Summary,
    #[serde(rename = "Work Experience")]
    Experience,
    #[serde(rename = "Skills Section")]
    Skills,
    #[serde(rename = "Education")]
    Education,
}

impl SectionKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SectionKind::Summary => "Professional Summary",
            SectionKind::Experience => "Work Experience",
            SectionKind::Skills => "Skills Section",
            SectionKind::Education => "Education",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    Excellent,
    Good,
    NeedsImprovement,
}

impl SectionStatus {
    /// Shared thresholds: > 75 excellent, > 50 good, otherwise needs-improvement.
    pub fn from_score(score: f64) -> Self {
        if score > 75.0 {
            SectionStatus::Excellent
        } else if score > 50.0 {
            SectionStatus::Good
        } else {
            SectionStatus::NeedsImprovement
        }
    }
}

/// Static feedback sentence for a (section, status) pair.
pub fn canned_feedback(section: SectionKind, status: SectionStatus) -> &'static str {
    use SectionKind::*;
    use SectionStatus::*;

    match (section, status) {
        (Summary, Excellent) => {
            "Your summary is compelling and clearly communicates your professional value."
        }
        (Summary, Good) => {
            "Your summary is solid. Consider highlighting your years of experience and proven results."
        }
        (Summary, NeedsImprovement) => {
            "Add a professional summary that outlines your experience, strengths, and career goals."
        }
        (Experience, Excellent) => {
            "Your work experience is detailed and backed by measurable achievements."
        }
        (Experience, Good) => {
            "Good experience section. Quantify more of your achievements with numbers and percentages."
        }
        (Experience, NeedsImprovement) => {
            "Add more work experience and describe your impact with concrete, measurable results."
        }
        (Skills, Excellent) => "Your skills section is comprehensive and well balanced.",
        (Skills, Good) => {
            "Your skills section is decent. Add more in-demand technical and soft skills."
        }
        (Skills, NeedsImprovement) => {
            "List more relevant skills, including technical tools and transferable strengths."
        }
        (Education, Excellent) => "Your education section is complete and well presented.",
        (Education, Good) => {
            "Your education section is adequate. Consider adding honours, coursework, or GPA."
        }
        (Education, NeedsImprovement) => {
            "Add your educational background, including degrees and institutions."
        }
    }
}

/// One scored section. `score` is clamped to 0–100; the display layer rounds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub name: SectionKind,
    pub score: f64,
    pub status: SectionStatus,
    pub feedback: String,
}

impl SectionScore {
    pub fn new(name: SectionKind, raw_score: f64) -> Self {
        let score = raw_score.clamp(0.0, 100.0);
        let status = SectionStatus::from_score(score);
        Self {
            name,
            score,
            status,
            feedback: canned_feedback(name, status).to_string(),
        }
    }
}

/// Immutable scoring snapshot. Recomputed on every analysis, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    pub overall_score: u32,
    pub sections: Vec<SectionScore>,
    pub suggestions: Vec<String>,
    pub ats_score: u32,
    pub industry_match: u32,
}

impl FeedbackReport {
    /// Score of the named section, if the report carries it.
    pub fn section_score(&self, kind: SectionKind) -> Option<f64> {
        self.sections
            .iter()
            .find(|s| s.name == kind)
            .map(|s| s.score)
    }

    /// Boundary check for reports sent back by a client: each of the four
    /// sections exactly once, every score within 0–100.
    pub fn validate(&self) -> Result<(), AppError> {
        for kind in ALL_SECTIONS {
            let count = self.sections.iter().filter(|s| s.name == kind).count();
            if count != 1 {
                return Err(AppError::Validation(format!(
                    "report must contain exactly one '{}' section, found {count}",
                    kind.display_name()
                )));
            }
        }
        if let Some(bad) = self
            .sections
            .iter()
            .find(|s| !(0.0..=100.0).contains(&s.score))
        {
            return Err(AppError::Validation(format!(
                "'{}' score {} is outside 0-100",
                bad.name.display_name(),
                bad.score
            )));
        }
        if self.overall_score > 100 {
            return Err(AppError::Validation(format!(
                "overall score {} is outside 0-100",
                self.overall_score
            )));
        }
        Ok(())
    }
}
