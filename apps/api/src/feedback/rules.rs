//! Rule tables for the four scored sections.
//!
//! Each section is a `SectionRubric`: a base function (returns `None` when the
//! section is absent) followed by an ordered list of `ScoreRule` bonuses. Scores
//! are evaluated raw here; clamping to 0–100 happens when the report is built.
//!
//! | Section      | Absent | Base                              | Bonuses                                  |
//! |--------------|--------|-----------------------------------|------------------------------------------|
//! | Summary      | 0      | clamp(words / 50 × 100, 40, 100)  | +10 tenure words, +10 evidence words     |
//! | Experience   | 0      | min(100, entries × 20 + 40)       | +15 any quantified description           |
//! | Skills       | 0      | min(100, skills / 15 × 100)       | +20 any technical-vocabulary skill       |
//! | Education    | 50     | 80                                | +15 any GPA > 3.5                        |

use crate::feedback::report::SectionKind;
use crate::models::resume::ResumeData;

/// Skills that earn the technical-skill bonus (case-insensitive substring match).
pub const TECH_VOCABULARY: &[&str] = &["JavaScript", "Python", "React", "Node.js", "SQL", "AWS"];

/// Summary length at which the base score saturates.
const SUMMARY_TARGET_WORDS: f64 = 50.0;
/// Skill count at which the base score saturates.
const SKILLS_TARGET_COUNT: f64 = 15.0;
const GPA_HONOURS_THRESHOLD: f64 = 3.5;

/// A single conditional adjustment within a section rubric.
pub struct ScoreRule {
    pub label: &'static str,
    pub condition: fn(&ResumeData) -> bool,
    pub adjustment: f64,
}

pub struct SectionRubric {
    pub section: SectionKind,
    /// `None` means the section is absent and scores `absent_score` with no bonuses.
    pub base: fn(&ResumeData) -> Option<f64>,
    pub absent_score: f64,
    pub rules: &'static [ScoreRule],
}

/// Raw result of evaluating one rubric.
#[derive(Debug, Clone, PartialEq)]
pub struct RubricOutcome {
    /// Unclamped. Work Experience can reach 115 when the base is already saturated.
    pub raw_score: f64,
    pub fired: Vec<&'static str>,
}

impl SectionRubric {
    pub fn evaluate(&self, resume: &ResumeData) -> RubricOutcome {
        let Some(base) = (self.base)(resume) else {
            return RubricOutcome {
                raw_score: self.absent_score,
                fired: vec![],
            };
        };

        let mut raw_score = base;
        let mut fired = Vec::new();
        for rule in self.rules {
            if (rule.condition)(resume) {
                raw_score += rule.adjustment;
                fired.push(rule.label);
            }
        }

        RubricOutcome { raw_score, fired }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rubrics
// ────────────────────────────────────────────────────────────────────────────

pub static SUMMARY_RUBRIC: SectionRubric = SectionRubric {
    section: SectionKind::Summary,
    base: summary_base,
    absent_score: 0.0,
    rules: &[
        ScoreRule {
            label: "mentions tenure",
            condition: summary_mentions_tenure,
            adjustment: 10.0,
        },
        ScoreRule {
            label: "cites evidence",
            condition: summary_cites_evidence,
            adjustment: 10.0,
        },
    ],
};

pub static EXPERIENCE_RUBRIC: SectionRubric = SectionRubric {
    section: SectionKind::Experience,
    base: experience_base,
    absent_score: 0.0,
    rules: &[ScoreRule {
        label: "quantified achievements",
        condition: experience_is_quantified,
        adjustment: 15.0,
    }],
};

pub static SKILLS_RUBRIC: SectionRubric = SectionRubric {
    section: SectionKind::Skills,
    base: skills_base,
    absent_score: 0.0,
    rules: &[ScoreRule {
        label: "technical skills",
        condition: has_technical_skill,
        adjustment: 20.0,
    }],
};

pub static EDUCATION_RUBRIC: SectionRubric = SectionRubric {
    section: SectionKind::Education,
    base: education_base,
    absent_score: 50.0,
    rules: &[ScoreRule {
        label: "strong gpa",
        condition: has_strong_gpa,
        adjustment: 15.0,
    }],
};

/// All rubrics in report order.
pub static RUBRICS: [&SectionRubric; 4] = [
    &SUMMARY_RUBRIC,
    &EXPERIENCE_RUBRIC,
    &SKILLS_RUBRIC,
    &EDUCATION_RUBRIC,
];

// ────────────────────────────────────────────────────────────────────────────
// Base functions
// ────────────────────────────────────────────────────────────────────────────

fn summary_base(resume: &ResumeData) -> Option<f64> {
    let summary = &resume.personal_info.summary;
    if summary.is_empty() {
        return None;
    }
    let words = summary.split_whitespace().count() as f64;
    Some((words / SUMMARY_TARGET_WORDS * 100.0).clamp(40.0, 100.0))
}

fn experience_base(resume: &ResumeData) -> Option<f64> {
    if resume.experience.is_empty() {
        return None;
    }
    Some((resume.experience.len() as f64 * 20.0 + 40.0).min(100.0))
}

fn skills_base(resume: &ResumeData) -> Option<f64> {
    if resume.skills.is_empty() {
        return None;
    }
    Some((resume.skills.len() as f64 / SKILLS_TARGET_COUNT * 100.0).min(100.0))
}

fn education_base(resume: &ResumeData) -> Option<f64> {
    (!resume.education.is_empty()).then_some(80.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Conditions
// ────────────────────────────────────────────────────────────────────────────

// Substring checks are case-sensitive.
fn summary_mentions_tenure(resume: &ResumeData) -> bool {
    let summary = &resume.personal_info.summary;
    summary.contains("years") || summary.contains("experience")
}

fn summary_cites_evidence(resume: &ResumeData) -> bool {
    let summary = &resume.personal_info.summary;
    summary.contains("proven") || summary.contains("demonstrated")
}

fn experience_is_quantified(resume: &ResumeData) -> bool {
    resume
        .experience
        .iter()
        .any(|e| has_quantified_achievement(&e.description))
}

fn has_technical_skill(resume: &ResumeData) -> bool {
    resume.skills.iter().any(|skill| {
        let skill = skill.to_lowercase();
        TECH_VOCABULARY
            .iter()
            .any(|tech| skill.contains(&tech.to_lowercase()))
    })
}

/// GPA strings that fail to parse are skipped, not reported.
fn has_strong_gpa(resume: &ResumeData) -> bool {
    resume.education.iter().any(|e| {
        e.gpa
            .as_deref()
            .and_then(|g| g.trim().parse::<f64>().ok())
            .is_some_and(|g| g > GPA_HONOURS_THRESHOLD)
    })
}

/// True when the text carries a percentage, a dollar amount, or any digit.
pub fn has_quantified_achievement(text: &str) -> bool {
    text.contains('%') || text.contains('$') || text.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationItem, ExperienceItem};

    fn job(description: &str) -> ExperienceItem {
        ExperienceItem {
            id: format!("job-{}", description.len()),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: description.to_string(),
        }
    }

    fn school(gpa: Option<&str>) -> EducationItem {
        EducationItem {
            id: "edu".to_string(),
            degree: "BSc".to_string(),
            school: "State".to_string(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            gpa: gpa.map(str::to_string),
        }
    }

    fn with_summary(summary: &str) -> ResumeData {
        let mut resume = ResumeData::default();
        resume.personal_info.summary = summary.to_string();
        resume
    }

    #[test]
    fn test_quantified_detection() {
        assert!(has_quantified_achievement("Grew revenue by 30%"));
        assert!(has_quantified_achievement("Saved $ on hosting"));
        assert!(has_quantified_achievement("Led a team of 5"));
        assert!(!has_quantified_achievement("Led a large team"));
    }

    #[test]
    fn test_summary_short_text_floors_at_40() {
        let outcome = SUMMARY_RUBRIC.evaluate(&with_summary("Engineer who ships."));
        assert_eq!(outcome.raw_score, 40.0);
        assert!(outcome.fired.is_empty());
    }

    #[test]
    fn test_summary_bonuses_are_case_sensitive() {
        let text = "Ten years of experience with proven delivery";
        let outcome = SUMMARY_RUBRIC.evaluate(&with_summary(text));
        // 7 words → 14 → floored to 40, +10 +10
        assert_eq!(outcome.raw_score, 60.0);
        assert_eq!(outcome.fired, vec!["mentions tenure", "cites evidence"]);

        let shouted = SUMMARY_RUBRIC.evaluate(&with_summary("YEARS EXPERIENCE PROVEN"));
        assert_eq!(shouted.raw_score, 40.0);
    }

    #[test]
    fn test_absent_summary_scores_zero() {
        let outcome = SUMMARY_RUBRIC.evaluate(&ResumeData::default());
        assert_eq!(outcome.raw_score, 0.0);
    }

    #[test]
    fn test_experience_bonus_not_reclamped() {
        let resume = ResumeData {
            experience: vec![job("a"), job("bb"), job("ccc"), job("Cut costs by $2M")],
            ..Default::default()
        };
        let outcome = EXPERIENCE_RUBRIC.evaluate(&resume);
        assert_eq!(outcome.raw_score, 115.0);
    }

    #[test]
    fn test_technical_skill_match_is_case_insensitive() {
        let mut resume = ResumeData::default();
        resume.add_skill("reactjs");
        let outcome = SKILLS_RUBRIC.evaluate(&resume);
        let expected = 1.0 / 15.0 * 100.0 + 20.0;
        assert!((outcome.raw_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_education_absent_is_flat_50() {
        assert_eq!(EDUCATION_RUBRIC.evaluate(&ResumeData::default()).raw_score, 50.0);
    }

    #[test]
    fn test_education_gpa_bonus_and_malformed_gpa() {
        let strong = ResumeData {
            education: vec![school(Some("3.8"))],
            ..Default::default()
        };
        assert_eq!(EDUCATION_RUBRIC.evaluate(&strong).raw_score, 95.0);

        let boundary = ResumeData {
            education: vec![school(Some("3.5"))],
            ..Default::default()
        };
        assert_eq!(EDUCATION_RUBRIC.evaluate(&boundary).raw_score, 80.0);

        let malformed = ResumeData {
            education: vec![school(Some("A+")), school(None)],
            ..Default::default()
        };
        assert_eq!(EDUCATION_RUBRIC.evaluate(&malformed).raw_score, 80.0);
    }

    #[test]
    fn test_rubrics_cover_each_section_once() {
        let sections: Vec<SectionKind> = RUBRICS.iter().map(|r| r.section).collect();
        assert_eq!(
            sections,
            vec![
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Skills,
                SectionKind::Education
            ]
        );
    }
}
