use crate::domain::model::AtsMetadata;
use serde::Serialize;

/// One job as displayed in result lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCard {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub date: String,
    /// Percent, `None` when the listing came without a score.
    pub match_score: Option<i64>,
    pub source: String,
    pub url: String,
    pub description: String,
    pub required_skills: String,
}

impl JobCard {
    pub fn has_link(&self) -> bool {
        !self.url.is_empty() && self.url != "#"
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SmartAssistantView {
    pub reply: String,
    pub coaching_advice: Option<String>,
    pub intent: String,
    pub search_query_used: Option<String>,
    pub total_matches: Option<u32>,
    pub cards: Vec<JobCard>,
    pub clarification_questions: Vec<String>,
}

impl SmartAssistantView {
    pub fn needs_clarification(&self) -> bool {
        !self.clarification_questions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationCategory {
    /// Key as sent by the backend.
    pub key: String,
    /// Display name.
    pub name: String,
    pub score: u8,
    pub positives: Vec<String>,
    pub negatives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub overall_score: i64,
    pub categories: Vec<EvaluationCategory>,
    pub summary: String,
    pub metadata: Option<AtsMetadata>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptimizedCv {
    pub text: Option<String>,
    pub latex: Option<String>,
    pub pdf: Option<Vec<u8>>,
    pub download_url: Option<String>,
}

impl OptimizedCv {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.latex.is_none() && self.pdf.is_none()
    }
}

/// What a page ends up showing: its view plus the banner message, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<V> {
    pub view: V,
    /// Set when the view holds static demo data instead of a backend answer.
    pub demo: bool,
    pub notice: Option<String>,
}

impl<V> Outcome<V> {
    pub fn live(view: V) -> Self {
        Self {
            view,
            demo: false,
            notice: None,
        }
    }

    pub fn demo(view: V, notice: impl Into<String>) -> Self {
        Self {
            view,
            demo: true,
            notice: Some(notice.into()),
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}
