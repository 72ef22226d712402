//! ATS evaluation report: pure layout, then PDF rendering.

pub mod ats_report;
pub mod layout;
pub mod metrics;
pub mod pdf;

use crate::domain::view::EvaluationResult;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Report bytes for an evaluation, ready to be written as `Rapport_ATS_{score}_{date}.pdf`.
pub fn ats_report_pdf(result: &EvaluationResult, file_name: &str, date: NaiveDate) -> Result<Vec<u8>> {
    let pages = ats_report::build_report(result, file_name, date);
    pdf::render_pdf(&pages)
}
