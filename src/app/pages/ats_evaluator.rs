use crate::core::client::ApiClient;
use crate::domain::forms::Upload;
use crate::domain::model::{AtsResponse, CategoryEvaluation};
use crate::domain::ports::PageController;
use crate::domain::view::{EvaluationCategory, EvaluationResult, Outcome};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_upload;
use async_trait::async_trait;

const SCORE_KEY: &str = "ATS_Score";

/// Backend category keys in display order, with their French labels.
pub const CATEGORIES: [(&str, &str); 14] = [
    ("Contact Information", "Information de Contact"),
    ("Spelling & Grammar", "Orthographe et Grammaire"),
    ("Personal Pronoun Usage", "Utilisation des Pronoms Personnels"),
    ("Skills & Keyword Targeting", "Compétences et Mots-clés"),
    ("Complex or Long Sentences", "Phrases Complexes ou Longues"),
    ("Generic or Weak Phrases", "Phrases Génériques ou Faibles"),
    ("Passive Voice Usage", "Utilisation de la Voix Passive"),
    ("Quantified Achievements", "Réalisations Quantifiées"),
    ("Required Resume Sections", "Sections Requises"),
    ("AI-generated Language", "Langage Généré par IA"),
    ("Repeated Action Verbs", "Verbes d'Action Répétés"),
    ("Visual Formatting or Readability", "Mise en Page et Lisibilité"),
    ("Personal Information / Bias Triggers", "Informations Personnelles / Biais"),
    ("Other Strengths and Weaknesses", "Autres Forces et Faiblesses"),
];

pub fn display_name(key: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
        .unwrap_or(key)
}

/// Share of positive findings as a percentage; 50 when the category has no findings.
pub fn category_score(positives: usize, negatives: usize) -> u8 {
    let total = positives + negatives;
    if total == 0 {
        return 50;
    }
    let score = (positives as f64 / total as f64) * 100.0;
    score.clamp(0.0, 100.0).round() as u8
}

pub fn summary_for(categories: &[EvaluationCategory]) -> String {
    let average = if categories.is_empty() {
        0.0
    } else {
        categories.iter().map(|c| c.score as f64).sum::<f64>() / categories.len() as f64
    };

    if average >= 80.0 {
        "Excellent! Votre CV est bien optimisé pour les ATS. Il présente une structure solide, un bon choix de mots-clés et une présentation professionnelle.".to_string()
    } else if average >= 60.0 {
        "Votre CV montre un bon potentiel mais pourrait être amélioré. Concentrez-vous sur l'ajout de plus de réalisations quantifiées et l'optimisation des mots-clés.".to_string()
    } else {
        "Votre CV nécessite des améliorations significatives pour être bien lu par les ATS. Travaillez sur la structure, les mots-clés et l'élimination des erreurs courantes.".to_string()
    }
}

fn category_row(key: &str, value: &serde_json::Value) -> EvaluationCategory {
    // 格式不符時視為沒有任何評語
    let findings: CategoryEvaluation = serde_json::from_value(value.clone()).unwrap_or_default();
    EvaluationCategory {
        key: key.to_string(),
        name: display_name(key).to_string(),
        score: category_score(findings.positives.len(), findings.negatives.len()),
        positives: findings.positives,
        negatives: findings.negatives,
    }
}

/// One row per evaluation entry except `ATS_Score`: known categories first in canonical
/// order, then any other key in key order.
pub fn evaluation_result(response: AtsResponse) -> EvaluationResult {
    let mut categories = Vec::with_capacity(response.evaluation.len());

    for (key, _) in CATEGORIES.iter() {
        if let Some(value) = response.evaluation.get(*key) {
            categories.push(category_row(key, value));
        }
    }
    for (key, value) in &response.evaluation {
        let known = CATEGORIES.iter().any(|(k, _)| k == key);
        if key != SCORE_KEY && !known {
            categories.push(category_row(key, value));
        }
    }

    let summary = summary_for(&categories);
    EvaluationResult {
        overall_score: response.ats_score.round() as i64,
        categories,
        summary,
        metadata: response.metadata,
    }
}

#[derive(Debug, Clone, Default)]
pub struct AtsEvaluationForm {
    pub upload: Option<Upload>,
    pub session_id: Option<String>,
}

pub struct AtsEvaluatorPage {
    client: ApiClient,
    max_upload_bytes: u64,
}

impl AtsEvaluatorPage {
    pub fn new(client: ApiClient, max_upload_bytes: u64) -> Self {
        Self {
            client,
            max_upload_bytes,
        }
    }
}

#[async_trait]
impl PageController for AtsEvaluatorPage {
    type Form = AtsEvaluationForm;
    type Response = AtsResponse;
    type View = EvaluationResult;

    fn name(&self) -> &'static str {
        "ats-evaluator"
    }

    fn validate(&self, form: &AtsEvaluationForm) -> Result<()> {
        let upload = form
            .upload
            .as_ref()
            .ok_or_else(|| AppError::validation("cv_file", "Veuillez sélectionner un fichier CV"))?;
        validate_upload(upload, self.max_upload_bytes)
    }

    async fn call(&self, form: &AtsEvaluationForm) -> Result<AtsResponse> {
        self.client
            .ats_evaluate(form.upload.as_ref(), None, form.session_id.as_deref())
            .await
    }

    fn present(&self, _form: &AtsEvaluationForm, response: AtsResponse) -> Result<Outcome<EvaluationResult>> {
        if !response.success {
            return Err(AppError::backend(
                response
                    .error
                    .unwrap_or_else(|| "Erreur lors de l'évaluation ATS".to_string()),
            ));
        }
        Ok(Outcome::live(evaluation_result(response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_score() {
        assert_eq!(category_score(0, 0), 50);
        assert_eq!(category_score(3, 0), 100);
        assert_eq!(category_score(0, 4), 0);
        assert_eq!(category_score(2, 1), 67);
        assert_eq!(category_score(1, 2), 33);
    }

    #[test]
    fn test_summary_thresholds() {
        let row = |score| EvaluationCategory {
            key: "k".into(),
            name: "k".into(),
            score,
            positives: vec![],
            negatives: vec![],
        };
        assert!(summary_for(&[row(80)]).starts_with("Excellent"));
        assert!(summary_for(&[row(60), row(70)]).contains("bon potentiel"));
        assert!(summary_for(&[row(59)]).contains("améliorations significatives"));
    }

    #[test]
    fn test_rows_follow_canonical_order_then_unknown_keys() {
        let response: AtsResponse = serde_json::from_value(json!({
            "success": true,
            "ats_score": 64.6,
            "evaluation": {
                "ATS_Score": 65,
                "Zeta Extra": {"Positives": ["x"], "Negatives": []},
                "Alpha Extra": {"Positives": [], "Negatives": []},
                "Spelling & Grammar": {"Positives": [], "Negatives": ["typo"]},
                "Contact Information": {"Positives": ["email", "phone"], "Negatives": ["no city"]}
            }
        }))
        .unwrap();

        let result = evaluation_result(response);

        assert_eq!(result.overall_score, 65);
        let names: Vec<&str> = result.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Information de Contact",
                "Orthographe et Grammaire",
                "Alpha Extra",
                "Zeta Extra"
            ]
        );
        assert_eq!(result.categories[0].score, 67);
        assert_eq!(result.categories[1].score, 0);
    }

    #[test]
    fn test_malformed_category_counts_as_empty() {
        let response: AtsResponse = serde_json::from_value(json!({
            "success": true,
            "ats_score": 50,
            "evaluation": { "Passive Voice Usage": "n/a" }
        }))
        .unwrap();

        let result = evaluation_result(response);
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].score, 50);
    }
}
