//! Resume analysis pipeline: prompt construction, the model call, and
//! normalization of whatever comes back.

pub mod normalize;
pub mod prompts;

use tracing::warn;

use crate::llm_client::GeminiClient;
use crate::models::resume::ResumeAnalysis;

/// Outcome of one analysis attempt. The model call failing is not an error
/// for the upload as a whole, so it is modeled as a tagged result rather
/// than propagated: the pipeline branches on it explicitly.
#[derive(Debug)]
pub enum AnalysisOutcome {
    Complete(ResumeAnalysis),
    Unavailable { reason: String },
}

impl AnalysisOutcome {
    /// Collapses the outcome into the analysis to persist: a complete result
    /// as-is, an unavailable one as the canonical default with the sentinel.
    pub fn into_analysis(self) -> ResumeAnalysis {
        match self {
            AnalysisOutcome::Complete(analysis) => analysis,
            AnalysisOutcome::Unavailable { reason } => {
                warn!("Persisting default analysis, enrichment unavailable: {reason}");
                ResumeAnalysis::unavailable()
            }
        }
    }
}

/// Runs the full analysis pipeline over extracted resume text. Infallible by
/// design: an unreachable or misbehaving model yields `Unavailable`, never an
/// error.
pub async fn analyze_resume(resume_text: &str, llm: &GeminiClient) -> AnalysisOutcome {
    let prompt = prompts::build_analysis_prompt(resume_text);

    match llm.generate(&prompt).await {
        Ok(response) => AnalysisOutcome::Complete(normalize::normalize(&response)),
        Err(e) => {
            warn!("Model call failed: {e}");
            AnalysisOutcome::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ANALYSIS_UNAVAILABLE;

    #[test]
    fn unavailable_outcome_collapses_to_sentinel_default() {
        let outcome = AnalysisOutcome::Unavailable {
            reason: "connection refused".to_string(),
        };
        let analysis = outcome.into_analysis();
        assert_eq!(analysis, ResumeAnalysis::unavailable());
        assert_eq!(
            analysis.improvement_areas,
            vec![ANALYSIS_UNAVAILABLE.to_string()]
        );
    }

    #[test]
    fn complete_outcome_passes_analysis_through() {
        let analysis = ResumeAnalysis {
            name: "Ada".to_string(),
            ..ResumeAnalysis::default()
        };
        let outcome = AnalysisOutcome::Complete(analysis.clone());
        assert_eq!(outcome.into_analysis(), analysis);
    }
}
