//! Suggestion generator: ordered, append-only advice derived from a résumé and its report.
//!
//! Rules run in a fixed sequence (summary → experience → skills → contact) and each
//! contributes at most one entry, so the list never exceeds four items.

use crate::feedback::report::{FeedbackReport, SectionKind};
use crate::feedback::rules::has_quantified_achievement;
use crate::models::resume::ResumeData;

/// Section score below which the summary suggestion fires.
const SUMMARY_SUGGESTION_THRESHOLD: f64 = 70.0;
/// Skill count below which the "expand skills" suggestion fires.
const MIN_SKILLS: usize = 8;

pub const SUGGEST_SUMMARY: &str =
    "Strengthen your professional summary with your years of experience and proven, demonstrated results.";
pub const SUGGEST_ADD_EXPERIENCE: &str =
    "Add your work experience, including roles, companies, and key responsibilities.";
pub const SUGGEST_QUANTIFY: &str =
    "Quantify your achievements with numbers, percentages, or dollar amounts to show impact.";
pub const SUGGEST_EXPAND_SKILLS: &str =
    "Add more relevant skills. Aim for at least 8 that cover both technical and soft skills.";
pub const SUGGEST_CONTACT_INFO: &str =
    "Complete your contact information so recruiters can reach you by phone and email.";

pub fn suggest(resume: &ResumeData, report: &FeedbackReport) -> Vec<String> {
    let mut suggestions = Vec::new();

    // A report without a summary section gives no signal, so the rule stays silent.
    if report
        .section_score(SectionKind::Summary)
        .is_some_and(|score| score < SUMMARY_SUGGESTION_THRESHOLD)
    {
        suggestions.push(SUGGEST_SUMMARY.to_string());
    }

    if resume.experience.is_empty() {
        suggestions.push(SUGGEST_ADD_EXPERIENCE.to_string());
    } else if !resume
        .experience
        .iter()
        .any(|e| has_quantified_achievement(&e.description))
    {
        suggestions.push(SUGGEST_QUANTIFY.to_string());
    }

    if resume.skills.len() < MIN_SKILLS {
        suggestions.push(SUGGEST_EXPAND_SKILLS.to_string());
    }

    let contact = &resume.personal_info;
    if contact.phone.is_empty() || contact.email.is_empty() {
        suggestions.push(SUGGEST_CONTACT_INFO.to_string());
    }

    suggestions
}
