// Explicit résumé edit operations. The résumé lives with the client; each request
// carries it together with an ordered list of edits and gets the result back.

pub mod handlers;

use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::resume::{ExperienceItem, ResumeData};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ResumeEdit {
    AddSkill { skill: String },
    RemoveSkill { skill: String },
    UpsertExperience { item: ExperienceItem },
    RemoveExperience { id: String },
}

/// Applies `edits` in order and returns how many changed the résumé.
///
/// Adding a skill that is already listed, or removing one that is not, is a no-op
/// rather than an error. The result is validated before it is returned.
pub fn apply_edits(resume: &mut ResumeData, edits: &[ResumeEdit]) -> Result<usize, AppError> {
    let mut applied = 0;
    for edit in edits {
        let changed = match edit {
            ResumeEdit::AddSkill { skill } => resume.add_skill(skill),
            ResumeEdit::RemoveSkill { skill } => resume.remove_skill(skill),
            ResumeEdit::UpsertExperience { item } => {
                if item.id.trim().is_empty() {
                    return Err(AppError::Validation(
                        "experience entry is missing an id".to_string(),
                    ));
                }
                resume.upsert_experience(item.clone());
                true
            }
            ResumeEdit::RemoveExperience { id } => resume.remove_experience(id),
        };
        debug!(?edit, changed, "Edit applied");
        if changed {
            applied += 1;
        }
    }
    resume.validate()?;
    Ok(applied)
}
