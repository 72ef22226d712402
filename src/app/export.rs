//! Download payloads built locally: job-card CSV and the optimizer zip bundle.

use crate::domain::view::{JobCard, OptimizedCv};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const JOBS_CSV_HEADER: [&str; 8] = [
    "id",
    "title",
    "company",
    "location",
    "match_score",
    "source",
    "url",
    "required_skills",
];

pub fn jobs_csv(cards: &[JobCard]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(JOBS_CSV_HEADER)?;

    for card in cards {
        let id = card.id.to_string();
        let score = card.match_score.map(|s| s.to_string()).unwrap_or_default();
        writer.write_record([
            id.as_str(),
            card.title.as_str(),
            card.company.as_str(),
            card.location.as_str(),
            score.as_str(),
            card.source.as_str(),
            card.url.as_str(),
            card.required_skills.as_str(),
        ])?;
    }

    let data = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(data)
}

/// `cv.txt`, `cv.tex` and `cv.pdf`, each only when present.
pub fn optimized_bundle(cv: &OptimizedCv) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    if let Some(text) = &cv.text {
        zip.start_file::<_, ()>("cv.txt", FileOptions::default())?;
        zip.write_all(text.as_bytes())?;
    }
    if let Some(latex) = &cv.latex {
        zip.start_file::<_, ()>("cv.tex", FileOptions::default())?;
        zip.write_all(latex.as_bytes())?;
    }
    if let Some(pdf) = &cv.pdf {
        zip.start_file::<_, ()>("cv.pdf", FileOptions::default())?;
        zip.write_all(pdf)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
