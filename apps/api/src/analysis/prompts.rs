// Resume analysis prompt templates.
// All prompts for the analysis module are defined here.

pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume text and extract information in STRICT JSON format. Return ONLY valid JSON without any additional text or markdown formatting.

You MUST return a FLAT JSON structure with ALL these exact field names:

{
  "name": "Full name of candidate",
  "email": "Email address",
  "phone": "Phone number",
  "linkedin": "LinkedIn URL",
  "github": "GitHub URL",
  "address": "Full address",
  "core_skills": ["skill1", "skill2", "skill3"],
  "soft_skills": ["soft1", "soft2"],
  "education": [{"degree": "degree", "institution": "school", "year": "year", "gpa": "gpa"}],
  "work_experience": [{"company": "company", "position": "role", "duration": "period", "description": "desc"}],
  "projects": [{"name": "project", "description": "desc", "technologies_used": ["tech1", "tech2"]}],
  "certifications": ["cert1", "cert2"],
  "languages_known": ["lang1", "lang2"],
  "hobbies": ["hobby1", "hobby2"],
  "resume_rating": "8/10",
  "improvement_areas": ["Add more metrics", "Include keywords", "Better formatting"],
  "upskill_suggestions": ["Cloud computing", "Advanced Rust", "Project management"]
}

CRITICAL REQUIREMENTS:
1. Return FLAT JSON structure - NO nested categories
2. Use exact field names as shown above
3. MUST provide resume_rating (e.g., "7/10", "8/10")
4. MUST provide 3-5 improvement_areas
5. MUST provide 3-5 upskill_suggestions
6. If field not found, use empty string "" or empty array []

Resume Text:
{resume_text}

Return ONLY the flat JSON object:"#;

/// Builds the analysis prompt for one resume. Pure and total: the text is
/// embedded verbatim, never inspected.
pub fn build_analysis_prompt(resume_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_resume_text_verbatim() {
        let prompt = build_analysis_prompt("Ada Lovelace\nada@example.com");
        assert!(prompt.contains("Ada Lovelace\nada@example.com"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn prompt_names_every_canonical_field() {
        let prompt = build_analysis_prompt("");
        for field in [
            "name",
            "email",
            "phone",
            "linkedin",
            "github",
            "address",
            "core_skills",
            "soft_skills",
            "education",
            "work_experience",
            "projects",
            "certifications",
            "languages_known",
            "hobbies",
            "resume_rating",
            "improvement_areas",
            "upskill_suggestions",
        ] {
            assert!(prompt.contains(field), "prompt missing field {field}");
        }
    }

    #[test]
    fn prompt_is_total_for_hostile_text() {
        // Braces in resume text must not break the template substitution.
        let prompt = build_analysis_prompt("worked on {templating} systems");
        assert!(prompt.contains("worked on {templating} systems"));
    }
}
