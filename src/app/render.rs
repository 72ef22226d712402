//! Plain-text rendering of page views for the terminal.

use crate::app::pages::cv_builder::CvBuilder;
use crate::domain::model::{CvAnalysisResult, SkillsCatalog};
use crate::domain::view::{EvaluationResult, JobCard, OptimizedCv, Outcome, SmartAssistantView};
use std::fmt::Write;

const RULE: &str = "────────────────────────────────────────";

/// Banner line for demo data or page notices, empty when there is none.
pub fn notice<V>(outcome: &Outcome<V>) -> String {
    match (&outcome.notice, outcome.demo) {
        (Some(n), true) => format!("⚠️  {}\n", n),
        (Some(n), false) => format!("ℹ️  {}\n", n),
        (None, true) => "⚠️  Mode démo\n".to_string(),
        (None, false) => String::new(),
    }
}

pub fn job_card(card: &JobCard) -> String {
    let mut out = String::new();
    let _ = write!(out, "#{} {}", card.id, card.title);
    if let Some(score) = card.match_score {
        let _ = write!(out, "  [{}%]", score);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "   {} · {} · {}", card.company, card.location, card.date);
    if !card.required_skills.trim().is_empty() {
        let _ = writeln!(out, "   Compétences: {}", card.required_skills.trim());
    }
    if card.has_link() {
        let _ = writeln!(out, "   {} ({})", card.url, card.source);
    } else {
        let _ = writeln!(out, "   Source: {}", card.source);
    }
    out
}

pub fn job_cards(cards: &[JobCard]) -> String {
    if cards.is_empty() {
        return "Aucun emploi à afficher.\n".to_string();
    }
    let mut out = format!("{} emploi(s) trouvé(s)\n{}\n", cards.len(), RULE);
    for card in cards {
        out.push_str(&job_card(card));
    }
    out
}

pub fn categories(names: &[String]) -> String {
    let mut out = format!("{} catégorie(s)\n", names.len());
    for name in names {
        let _ = writeln!(out, " • {}", name);
    }
    out
}

pub fn skills(catalog: &SkillsCatalog) -> String {
    let mut out = format!("{} compétence(s) reconnue(s)\n", catalog.total_skills);
    let _ = writeln!(out, "{}", catalog.technical_skills.join(", "));
    out
}

pub fn smart_assistant(view: &SmartAssistantView) -> String {
    let mut out = String::new();
    if !view.reply.is_empty() {
        let _ = writeln!(out, "🤖 {}", view.reply);
    }
    if let Some(advice) = &view.coaching_advice {
        let _ = writeln!(out, "💡 {}", advice);
    }
    if !view.intent.is_empty() {
        let _ = writeln!(out, "Intention: {}", view.intent);
    }
    if let Some(query) = &view.search_query_used {
        let _ = writeln!(out, "Recherche: {}", query);
    }
    if view.needs_clarification() {
        let _ = writeln!(out, "Questions de clarification:");
        for question in &view.clarification_questions {
            let _ = writeln!(out, " ? {}", question);
        }
    }
    if !view.cards.is_empty() {
        out.push_str(&job_cards(&view.cards));
    }
    out
}

pub fn analysis(result: &CvAnalysisResult) -> String {
    let mut out = String::new();
    let score = (result.match_score * 100.0).round() as i64;
    let _ = writeln!(out, "Score de correspondance: {}%", score);

    let method = &result.score_analysis.method;
    if !method.is_empty() {
        let _ = writeln!(out, "Méthode: {}", method);
    }
    if !result.summary.coverage.is_empty() {
        let _ = writeln!(out, "Couverture: {}", result.summary.coverage);
    }
    if !result.overall_assessment.is_empty() {
        let _ = writeln!(out, "{}", result.overall_assessment);
    }

    let common = if result.summary.common_skills.is_empty() {
        &result.score_analysis.common_skills
    } else {
        &result.summary.common_skills
    };
    if !common.is_empty() {
        let _ = writeln!(out, "✅ Compétences communes: {}", common.join(", "));
    }
    if !result.missing_skills.is_empty() {
        let _ = writeln!(out, "❌ Compétences manquantes: {}", result.missing_skills.join(", "));
    }

    for (severity, label) in [("high", "Critique"), ("medium", "Moyen"), ("low", "Faible")] {
        let gaps: Vec<&str> = result
            .skill_gaps
            .iter()
            .filter(|g| g.gap_severity.eq_ignore_ascii_case(severity))
            .map(|g| g.skill_name.as_str())
            .collect();
        if !gaps.is_empty() {
            let _ = writeln!(out, "Écart {}: {}", label, gaps.join(", "));
        }
    }
    out
}

pub fn evaluation(result: &EvaluationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Score ATS global: {}/100", result.overall_score);
    let _ = writeln!(out, "{}", RULE);
    for category in &result.categories {
        let _ = writeln!(
            out,
            "{:<40} {:>3}%  (+{} / -{})",
            category.name,
            category.score,
            category.positives.len(),
            category.negatives.len()
        );
    }
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}", result.summary);
    out
}

pub fn optimized(cv: &OptimizedCv) -> String {
    let mut out = String::new();
    if let Some(text) = &cv.text {
        let _ = writeln!(out, "{}\n{}\n{}", RULE, text.trim_end(), RULE);
    }
    if cv.latex.is_some() {
        let _ = writeln!(out, "Source LaTeX disponible");
    }
    if let Some(pdf) = &cv.pdf {
        let _ = writeln!(out, "PDF disponible ({} octets)", pdf.len());
    }
    if let Some(url) = &cv.download_url {
        let _ = writeln!(out, "Lien: {}", url);
    }
    out
}

/// Summary of the builder form, as in the last step.
pub fn builder_preview(builder: &CvBuilder) -> String {
    let form = builder.form();
    let info = &form.personal_info;
    let mut out = String::new();
    let _ = writeln!(out, "Étape {}/6 · {}", builder.step(), builder.step_title());
    let _ = writeln!(out, "{} <{}>", info.full_name, info.email);
    let experiences = form
        .experiences
        .iter()
        .filter(|e| !e.company.trim().is_empty() || !e.position.trim().is_empty())
        .count();
    let _ = writeln!(out, "Expériences: {}", experiences);
    let _ = writeln!(out, "Compétences: {}", form.skills.join(", "));
    out
}
