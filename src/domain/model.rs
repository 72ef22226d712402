//! Response shapes returned by the career-match backend.
//!
//! Every field the backend may omit is optional or defaulted; nothing here is validated
//! beyond what serde enforces.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Defaulted fields accept an explicit `null` as well as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ===== Jobs =====

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchUrls {
    pub linkedin: Option<String>,
    pub google: Option<String>,
    pub indeed: Option<String>,
    pub stagiaires_url: Option<String>,
    pub rekrute_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub job_id: Option<i64>,
    pub job_title: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: String,
    pub recommended_courses: Option<String>,
    pub avg_salary_mad: Option<f64>,
    pub demand_level: Option<String>,
    pub match_score: Option<f64>,
    pub linkedin_url: Option<String>,
    pub all_search_urls: Option<SearchUrls>,
    pub source_query: Option<String>,
    pub location: Option<String>,
    pub stagiaires_url: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: Vec<Job>,
    pub analysis: Option<serde_json::Value>,
    pub summary: Option<serde_json::Value>,
    pub search_query_used: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
    pub debug_info: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmartAssistantResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub assistant_response: String,
    pub coaching_advice: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intent: String,
    pub search_query_used: Option<String>,
    pub total_matches: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: Vec<Job>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub search_urls: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub needs_clarification: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clarification_questions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_coaching: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Job>,
}

// ===== CV analysis =====

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub final_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cv_skills_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_skills_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub common_skills_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coverage_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub common_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SkillGap {
    pub skill_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gap_severity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strict_missing: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explicit_in_jd: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explicit_in_cv: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cv_skills_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_skills_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub common_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coverage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coverage_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub methodology: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CvSections {
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CvAnalysisResult {
    /// Backend score in `0.0..=1.0`.
    pub match_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score_analysis: ScoreAnalysis,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cv_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill_gaps: Vec<SkillGap>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strict_analysis: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_assessment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence_level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: AnalysisSummary,
    pub cv_sections: Option<CvSections>,
    pub filename: Option<String>,
    pub api_skills: Option<Vec<String>>,
    pub api_experience: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillsCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_skills: u32,
}

// ===== ATS =====

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryEvaluation {
    #[serde(rename = "Positives", default, deserialize_with = "null_as_default")]
    pub positives: Vec<String>,
    #[serde(rename = "Negatives", default, deserialize_with = "null_as_default")]
    pub negatives: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AtsMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resume_length: u64,
}

/// `evaluation` maps category names to their findings, plus a numeric `ATS_Score` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ats_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub evaluation: BTreeMap<String, serde_json::Value>,
    pub metadata: Option<AtsMetadata>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OptimizationMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub template: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub generator: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_preserved: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtsOptimizationResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    pub ats_cv_text: Option<String>,
    pub ats_latex: Option<String>,
    pub pdf_base64: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pdf_available: bool,
    pub download_url: Option<String>,
    pub metadata: Option<OptimizationMetadata>,
    pub error: Option<String>,
    pub error_details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_with_missing_fields() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "job_title": "Data Analyst",
            "match_score": 0.42
        }))
        .unwrap();

        assert_eq!(job.job_title.as_deref(), Some("Data Analyst"));
        assert!(job.job_id.is_none());
        assert!(job.description.is_empty());
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let reply: SmartAssistantResponse = serde_json::from_value(serde_json::json!({
            "assistant_response": null,
            "intent": null,
            "jobs": null,
            "needs_clarification": null
        }))
        .unwrap();
        assert!(reply.assistant_response.is_empty());
        assert!(reply.jobs.is_empty());
        assert!(!reply.needs_clarification);

        let analysis: CvAnalysisResult = serde_json::from_value(serde_json::json!({
            "match_score": 0.6,
            "overall_assessment": null,
            "summary": null,
            "skill_gaps": [{ "skill_name": "AWS", "gap_severity": null }]
        }))
        .unwrap();
        assert!(analysis.overall_assessment.is_empty());
        assert_eq!(analysis.summary, AnalysisSummary::default());
        assert!(analysis.skill_gaps[0].gap_severity.is_empty());
    }

    #[test]
    fn test_ats_response_keeps_score_entry_in_evaluation() {
        let resp: AtsResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "ats_score": 71,
            "evaluation": {
                "ATS_Score": 71,
                "Contact Information": {"Positives": ["email"], "Negatives": []}
            }
        }))
        .unwrap();

        assert_eq!(resp.evaluation.len(), 2);
        assert_eq!(resp.ats_score, 71.0);
    }
}
