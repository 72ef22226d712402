//! Layout of the downloadable ATS evaluation report.

use super::layout::{Canvas, Page, Rgb};
use super::metrics::Font;
use crate::domain::view::EvaluationResult;
use crate::utils::text::{clean_for_report, french_date};
use chrono::NaiveDate;

const DARK: Rgb = Rgb(33, 37, 41);
const MUTED: Rgb = Rgb(108, 117, 125);
const BODY: Rgb = Rgb(73, 80, 87);
const RULE_GREY: Rgb = Rgb(200, 200, 200);
const PANEL: Rgb = Rgb(248, 249, 250);
const BAR_BACKGROUND: Rgb = Rgb(233, 236, 239);
const GREEN: Rgb = Rgb(34, 197, 94);
const RED: Rgb = Rgb(239, 68, 68);

const MARGIN_X: f32 = 20.0;
const TOP_Y: f32 = 20.0;
const CATEGORY_BREAK_Y: f32 = 270.0;
const DETAILS_BREAK_Y: f32 = 250.0;
const RECOMMENDATIONS_BREAK_Y: f32 = 200.0;
const FOOTER_Y: f32 = 285.0;
const BAR_WIDTH: f32 = 50.0;
const BAR_HEIGHT: f32 = 4.0;

pub const DEFAULT_FILE_NAME: &str = "CV_analyse";

pub const RECOMMENDATIONS: [&str; 8] = [
    "1. MOTS-CLÉS: Incluez les termes spécifiques au poste cible",
    "2. CHIFFRES: Quantifiez vos réussites (ex: 'augmenté les ventes de 25%')",
    "3. STRUCTURE: Utilisez des titres clairs (Expérience, Formation, Compétences)",
    "4. VERBES D'ACTION: Commencez vos phrases avec des verbes forts",
    "5. LONGUEUR: Gardez votre CV concis (1-2 pages maximum)",
    "6. FORMAT: Évitez les tableaux, images et polices fantaisistes",
    "7. CONTACT: Incluez email et téléphone professionnels",
    "8. RELECTURE: Relisez pour éviter les fautes d'orthographe",
];

pub fn score_color_hex(score: i64) -> &'static str {
    if score >= 80 {
        "#10b981"
    } else if score >= 60 {
        "#f59e0b"
    } else {
        "#ef4444"
    }
}

pub fn score_color(score: i64) -> Rgb {
    Rgb::from_hex(score_color_hex(score))
}

/// Running vertical position; breaks to a new page past a threshold.
struct Cursor {
    canvas: Canvas,
    y: f32,
}

impl Cursor {
    fn break_after(&mut self, limit: f32) {
        if self.y > limit {
            self.canvas.add_page();
            self.y = TOP_Y;
        }
    }

    /// Bulleted findings under a colored heading, wrapped at 160 mm, 5 mm per line.
    fn findings(&mut self, heading: &str, color: Rgb, items: &[String]) {
        self.canvas.set_font(9.0, Font::Regular);
        self.canvas.set_color(color);
        self.canvas.text(heading, 25.0, self.y);
        self.y += 5.0;

        for item in items {
            self.break_after(CATEGORY_BREAK_Y);
            let lines = self
                .canvas
                .wrap(&format!("• {}", clean_for_report(item)), 160.0);
            self.canvas.lines(&lines, 30.0, self.y, 5.0);
            self.y += lines.len() as f32 * 5.0;
        }
    }
}

fn header(canvas: &mut Canvas) {
    canvas.set_font(20.0, Font::Bold);
    canvas.set_color(DARK);
    canvas.centered_text("RAPPORT D'ÉVALUATION ATS", 105.0, 20.0);

    canvas.set_font(12.0, Font::Regular);
    canvas.set_color(MUTED);
    canvas.centered_text("Career Assistant - Évaluation Professionnelle", 105.0, 30.0);

    canvas.line(MARGIN_X, 35.0, 190.0, 35.0, 0.2, RULE_GREY);
}

fn general_info(canvas: &mut Canvas, result: &EvaluationResult, file_name: &str, date: &str) {
    canvas.set_font(14.0, Font::Bold);
    canvas.set_color(DARK);
    canvas.text("Informations Générales", MARGIN_X, 45.0);

    canvas.set_font(10.0, Font::Regular);
    canvas.set_color(BODY);
    canvas.text(format!("Date: {}", date), MARGIN_X, 55.0);
    canvas.text(format!("Fichier analysé: {}", file_name), MARGIN_X, 62.0);
    canvas.text(
        format!("Score Global ATS: {}/100", result.overall_score),
        MARGIN_X,
        69.0,
    );
    if let Some(metadata) = &result.metadata {
        canvas.text(format!("Modèle IA: {}", metadata.model), MARGIN_X, 76.0);
        canvas.text(
            format!("Longueur du CV: {} caractères", metadata.resume_length),
            MARGIN_X,
            83.0,
        );
    }
}

fn score_panel(canvas: &mut Canvas, score: i64) {
    let (cx, cy, r) = (155.0, 65.0, 15.0);
    canvas.rect(120.0, 45.0, 70.0, 40.0, 3.0, PANEL);
    canvas.circle(cx, cy, r, 2.0, RULE_GREY);
    canvas.circle(cx, cy, r, 3.0, score_color(score));

    canvas.set_font(16.0, Font::Bold);
    canvas.set_color(DARK);
    canvas.centered_text(&score.to_string(), cx, cy + 2.0);
    canvas.set_font(8.0, Font::Regular);
    canvas.centered_text("points", cx, cy + 10.0);
}

/// Lays out the full report. `file_name` is the analysed CV's name.
pub fn build_report(result: &EvaluationResult, file_name: &str, date: NaiveDate) -> Vec<Page> {
    let date = french_date(date);
    let file_name = if file_name.trim().is_empty() {
        DEFAULT_FILE_NAME
    } else {
        file_name
    };

    let mut canvas = Canvas::new();
    header(&mut canvas);
    general_info(&mut canvas, result, file_name, &date);
    score_panel(&mut canvas, result.overall_score);

    canvas.set_font(14.0, Font::Bold);
    canvas.set_color(DARK);
    canvas.text("Résumé de l'Évaluation", MARGIN_X, 95.0);

    canvas.set_font(10.0, Font::Regular);
    canvas.set_color(BODY);
    let summary = canvas.wrap(&clean_for_report(&result.summary), 170.0);
    canvas.lines(&summary, MARGIN_X, 105.0, 6.0);

    let mut cursor = Cursor {
        y: 105.0 + summary.len() as f32 * 6.0 + 15.0,
        canvas,
    };
    cursor.break_after(DETAILS_BREAK_Y);

    cursor.canvas.set_font(14.0, Font::Bold);
    cursor.canvas.set_color(DARK);
    cursor.canvas.text("Détails par Catégorie", MARGIN_X, cursor.y);
    cursor.y += 10.0;

    for category in &result.categories {
        cursor.break_after(CATEGORY_BREAK_Y);

        cursor.canvas.set_font(11.0, Font::Bold);
        cursor.canvas.set_color(DARK);
        cursor
            .canvas
            .text(format!("{}: {}%", category.name, category.score), MARGIN_X, cursor.y);
        cursor.y += 7.0;

        let filled = category.score as f32 / 100.0 * BAR_WIDTH;
        cursor
            .canvas
            .rect(MARGIN_X, cursor.y, BAR_WIDTH, BAR_HEIGHT, 0.0, BAR_BACKGROUND);
        if filled > 0.0 {
            cursor.canvas.rect(
                MARGIN_X,
                cursor.y,
                filled,
                BAR_HEIGHT,
                0.0,
                score_color(category.score as i64),
            );
        }
        cursor.y += 10.0;

        if !category.positives.is_empty() {
            cursor.findings("Points forts:", GREEN, &category.positives);
            cursor.y += 2.0;
        }
        if !category.negatives.is_empty() {
            cursor.break_after(CATEGORY_BREAK_Y);
            cursor.findings("Points à améliorer:", RED, &category.negatives);
        }
        cursor.y += 8.0;
    }

    cursor.break_after(RECOMMENDATIONS_BREAK_Y);
    cursor.canvas.set_font(14.0, Font::Bold);
    cursor.canvas.set_color(DARK);
    cursor
        .canvas
        .text("Recommandations pour l'Optimisation ATS", MARGIN_X, cursor.y);
    cursor.y += 10.0;

    cursor.canvas.set_font(10.0, Font::Regular);
    cursor.canvas.set_color(BODY);
    for recommendation in RECOMMENDATIONS {
        cursor.break_after(CATEGORY_BREAK_Y);
        let lines = cursor.canvas.wrap(recommendation, 170.0);
        cursor.canvas.lines(&lines, MARGIN_X, cursor.y, 6.0);
        cursor.y += lines.len() as f32 * 6.0;
    }

    let mut canvas = cursor.canvas;
    canvas.set_font(8.0, Font::Regular);
    canvas.set_color(MUTED);
    canvas.centered_text(
        &format!("© Career Assistant - Rapport généré le {}", date),
        105.0,
        FOOTER_Y,
    );

    canvas.into_pages()
}
