use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::feedback::apply::ResumePatch;

/// Contact details and the free-text professional summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub summary: String,
}

impl PersonalInfo {
    /// `{firstName}_{lastName}_Resume`, restricted to filename-safe characters.
    /// Falls back to `Resume` when both names are empty.
    pub fn document_identity(&self) -> String {
        let parts: Vec<String> = [&self.first_name, &self.last_name]
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(sanitize_file_component)
            .collect();

        if parts.is_empty() {
            "Resume".to_string()
        } else {
            format!("{}_Resume", parts.join("_"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Free text, may span several lines.
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub id: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Numeric string when present, e.g. "3.8". Malformed values are ignored by scoring.
    #[serde(default)]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Comma-separated free text.
    #[serde(default)]
    pub technologies: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub link: String,
}

/// Ordered, duplicate-free skill list. Insertion order is display order.
///
/// Incoming payloads are routed through [`Skills::insert`], so duplicates in a
/// request body are dropped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Skills(Vec<String>);

impl Skills {
    /// Appends a skill. Returns `false` (and changes nothing) for blank or duplicate input.
    pub fn insert(&mut self, skill: impl AsRef<str>) -> bool {
        let skill = skill.as_ref().trim();
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.0.push(skill.to_string());
        true
    }

    pub fn remove(&mut self, skill: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|s| s != skill);
        self.0.len() != before
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill)
    }

    /// First `n` skills in insertion order.
    pub fn top(&self, n: usize) -> &[String] {
        &self.0[..n.min(self.0.len())]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for Skills {
    fn from(raw: Vec<String>) -> Self {
        let mut skills = Skills::default();
        for skill in raw {
            skills.insert(skill);
        }
        skills
    }
}

impl From<Skills> for Vec<String> {
    fn from(skills: Skills) -> Self {
        skills.0
    }
}

/// The structured résumé being scored and exported.
///
/// `personalInfo` is required on the wire; every list defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
    #[serde(default)]
    pub skills: Skills,
}

impl ResumeData {
    /// Boundary check run before scoring: ids must be present and unique per list.
    pub fn validate(&self) -> Result<(), AppError> {
        check_ids("experience", self.experience.iter().map(|e| e.id.as_str()))?;
        check_ids("education", self.education.iter().map(|e| e.id.as_str()))?;
        check_ids("projects", self.projects.iter().map(|p| p.id.as_str()))?;
        Ok(())
    }

    pub fn add_skill(&mut self, skill: &str) -> bool {
        self.skills.insert(skill)
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        self.skills.remove(skill)
    }

    /// Replaces the entry with the same id in place, or appends it.
    pub fn upsert_experience(&mut self, item: ExperienceItem) {
        match self.experience.iter_mut().find(|e| e.id == item.id) {
            Some(existing) => *existing = item,
            None => self.experience.push(item),
        }
    }

    pub fn remove_experience(&mut self, id: &str) -> bool {
        let before = self.experience.len();
        self.experience.retain(|e| e.id != id);
        self.experience.len() != before
    }

    /// Merges a suggestion patch. Proposed skills go through the dedupe path,
    /// experience descriptions are replaced by id (unknown ids are skipped).
    pub fn apply_patch(&mut self, patch: &ResumePatch) {
        if let Some(summary) = &patch.summary {
            self.personal_info.summary = summary.clone();
        }
        if let Some(skills) = &patch.skills {
            for skill in skills {
                self.skills.insert(skill);
            }
        }
        if let Some(experience) = &patch.experience {
            for update in experience {
                if let Some(entry) = self.experience.iter_mut().find(|e| e.id == update.id) {
                    entry.description = update.description.clone();
                }
            }
        }
    }
}

fn sanitize_file_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn check_ids<'a>(list: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(AppError::Validation(format!("{list} entry is missing an id")));
        }
        if !seen.insert(id) {
            return Err(AppError::Validation(format!(
                "duplicate {list} id '{id}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::apply::ExperienceUpdate;
    use serde_json::json;

    fn job(id: &str, description: &str) -> ExperienceItem {
        ExperienceItem {
            id: id.to_string(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: String::new(),
            start_date: "2020-01".to_string(),
            end_date: String::new(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_skill_insert_rejects_duplicates_silently() {
        let mut skills = Skills::default();
        assert!(skills.insert("Rust"));
        assert!(!skills.insert("Rust"));
        assert!(!skills.insert("   "));
        assert_eq!(skills.len(), 1);
    }

    #[test]
    fn test_skills_keep_insertion_order() {
        let skills = Skills::from(vec![
            "Go".to_string(),
            "Rust".to_string(),
            "Go".to_string(),
            "SQL".to_string(),
        ]);
        let ordered: Vec<&str> = skills.iter().map(String::as_str).collect();
        assert_eq!(ordered, vec!["Go", "Rust", "SQL"]);
        assert_eq!(skills.top(2), &["Go".to_string(), "Rust".to_string()]);
        assert_eq!(skills.top(10).len(), 3);
    }

    #[test]
    fn test_deserialize_camel_case_and_dedupes_skills() {
        let resume: ResumeData = serde_json::from_value(json!({
            "personalInfo": { "firstName": "Ada", "lastName": "Lovelace", "summary": "x" },
            "experience": [{ "id": "e1", "title": "Analyst", "startDate": "1842" }],
            "skills": ["Math", "Math", "Poetry"]
        }))
        .unwrap();
        assert_eq!(resume.personal_info.first_name, "Ada");
        assert_eq!(resume.experience[0].start_date, "1842");
        assert_eq!(resume.skills.len(), 2);
        assert!(resume.education.is_empty());
    }

    #[test]
    fn test_deserialize_requires_personal_info() {
        let result = serde_json::from_value::<ResumeData>(json!({ "skills": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_experience_ids() {
        let resume = ResumeData {
            experience: vec![job("a", ""), job("a", "")],
            ..Default::default()
        };
        assert!(matches!(resume.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_blank_ids() {
        let resume = ResumeData {
            experience: vec![job(" ", "")],
            ..Default::default()
        };
        assert!(resume.validate().is_err());
    }

    #[test]
    fn test_upsert_and_remove_experience() {
        let mut resume = ResumeData::default();
        resume.upsert_experience(job("a", "first"));
        resume.upsert_experience(job("b", "second"));
        resume.upsert_experience(job("a", "rewritten"));
        assert_eq!(resume.experience.len(), 2);
        assert_eq!(resume.experience[0].description, "rewritten");
        assert!(resume.remove_experience("b"));
        assert!(!resume.remove_experience("b"));
    }

    #[test]
    fn test_apply_patch_merges_without_duplicate_skills() {
        let mut resume = ResumeData::default();
        resume.add_skill("Team Leadership");
        resume.upsert_experience(job("a", "old"));

        let patch = ResumePatch {
            summary: Some("new summary".to_string()),
            skills: Some(vec!["Team Leadership".to_string(), "Problem Solving".to_string()]),
            experience: Some(vec![
                ExperienceUpdate {
                    id: "a".to_string(),
                    description: "new".to_string(),
                },
                ExperienceUpdate {
                    id: "missing".to_string(),
                    description: "ignored".to_string(),
                },
            ]),
        };
        resume.apply_patch(&patch);

        assert_eq!(resume.personal_info.summary, "new summary");
        assert_eq!(resume.skills.len(), 2);
        assert_eq!(resume.experience.len(), 1);
        assert_eq!(resume.experience[0].description, "new");
    }

    #[test]
    fn test_remove_skill() {
        let mut resume = ResumeData::default();
        resume.add_skill("Rust");
        resume.add_skill("Go");
        assert!(resume.remove_skill("Rust"));
        assert!(!resume.remove_skill("Rust"));
        assert!(!resume.remove_skill("Kotlin"));
        let left: Vec<&str> = resume.skills.iter().map(String::as_str).collect();
        assert_eq!(left, vec!["Go"]);

        // Removed skills can be added back.
        assert!(resume.add_skill("Rust"));
        assert_eq!(resume.skills.len(), 2);
    }

    #[test]
    fn test_document_identity() {
        let identity = |first: &str, last: &str| {
            PersonalInfo {
                first_name: first.to_string(),
                last_name: last.to_string(),
                ..Default::default()
            }
            .document_identity()
        };
        assert_eq!(identity("Ada", "Lovelace"), "Ada_Lovelace_Resume");
        assert_eq!(identity("Jean Luc", "Picard"), "Jean_Luc_Picard_Resume");
        assert_eq!(identity("", ""), "Resume");
        assert_eq!(identity("Cher", ""), "Cher_Resume");
    }
}
