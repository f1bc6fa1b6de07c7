use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Single sentinel placed in `improvement_areas` whenever analysis could not
/// produce real data, so a stored record is distinguishable from a resume
/// the model genuinely had nothing to say about.
pub const ANALYSIS_UNAVAILABLE: &str = "Unable to analyze resume";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies_used: Vec<String>,
}

/// The canonical normalized shape of one analyzed resume.
///
/// `ResumeAnalysis::default()` is the single canonical default structure:
/// every field present, strings empty, sequences empty, rating "0/10". The
/// normalizer fills missing fields from it and the failure path persists it
/// (with the sentinel) — there is no second copy of these defaults anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeAnalysis {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub address: String,
    pub core_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<String>,
    pub languages_known: Vec<String>,
    pub hobbies: Vec<String>,
    pub resume_rating: String,
    pub improvement_areas: Vec<String>,
    pub upskill_suggestions: Vec<String>,
}

impl Default for ResumeAnalysis {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            linkedin: String::new(),
            github: String::new(),
            address: String::new(),
            core_skills: Vec::new(),
            soft_skills: Vec::new(),
            education: Vec::new(),
            work_experience: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            languages_known: Vec::new(),
            hobbies: Vec::new(),
            resume_rating: "0/10".to_string(),
            improvement_areas: Vec::new(),
            upskill_suggestions: Vec::new(),
        }
    }
}

impl ResumeAnalysis {
    /// The canonical default with exactly one sentinel in `improvement_areas`.
    /// Used whenever analysis fails outright (empty model response, malformed
    /// JSON, model call unavailable).
    pub fn unavailable() -> Self {
        Self {
            improvement_areas: vec![ANALYSIS_UNAVAILABLE.to_string()],
            ..Self::default()
        }
    }
}

/// Full persisted resume record, one row in `resumes`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeRow {
    pub id: i32,
    pub file_name: String,
    pub upload_date: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub address: String,
    pub core_skills: Json<Vec<String>>,
    pub soft_skills: Json<Vec<String>>,
    pub education: Json<Vec<EducationEntry>>,
    pub work_experience: Json<Vec<WorkExperienceEntry>>,
    pub projects: Json<Vec<ProjectEntry>>,
    pub certifications: Json<Vec<String>>,
    pub languages_known: Json<Vec<String>>,
    pub hobbies: Json<Vec<String>>,
    pub resume_rating: String,
    pub improvement_areas: Json<Vec<String>>,
    pub upskill_suggestions: Json<Vec<String>>,
    pub raw_text: String,
}

/// One row of the list endpoint. Contact fields the analysis left empty are
/// rendered as "Unknown" for the listing, matching the detail-vs-summary
/// split the frontend expects.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeSummaryRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub file_name: String,
    pub upload_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_analysis_has_rating_floor_and_empty_collections() {
        let d = ResumeAnalysis::default();
        assert_eq!(d.resume_rating, "0/10");
        assert!(d.name.is_empty());
        assert!(d.work_experience.is_empty());
        assert!(d.improvement_areas.is_empty());
    }

    #[test]
    fn unavailable_carries_exactly_one_sentinel() {
        let u = ResumeAnalysis::unavailable();
        assert_eq!(u.improvement_areas, vec![ANALYSIS_UNAVAILABLE.to_string()]);
        assert_eq!(u.resume_rating, "0/10");
    }

    #[test]
    fn analysis_deserializes_with_all_fields_missing() {
        let a: ResumeAnalysis = serde_json::from_str("{}").unwrap();
        assert_eq!(a, ResumeAnalysis::default());
    }
}
