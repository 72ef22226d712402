use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Collapses whitespace runs into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_runs().replace_all(text, " ").into_owned()
}

/// Normalises backend prose before it is laid out in a report.
pub fn clean_for_report(text: &str) -> String {
    collapse_whitespace(text)
        .replace("' ", "'")
        .replace(" .", ".")
        .replace(" ,", ",")
        .trim()
        .to_string()
}

/// `CV_{name}_{YYYY-MM-DD}.docx`, whitespace runs in the name become underscores.
pub fn cv_download_filename(full_name: &str, date: NaiveDate) -> String {
    let trimmed = full_name.trim();
    let name = if trimmed.is_empty() {
        "CV".to_string()
    } else {
        whitespace_runs().replace_all(trimmed, "_").into_owned()
    };
    format!("CV_{}_{}.docx", name, date.format("%Y-%m-%d"))
}

/// `Rapport_ATS_{score}_{dd-mm-yyyy}.pdf`
pub fn ats_report_filename(score: i64, date: NaiveDate) -> String {
    format!("Rapport_ATS_{}_{}.pdf", score, date.format("%d-%m-%Y"))
}

pub fn optimized_cv_filename(stamp_millis: i64, extension: &str) -> String {
    format!("CV_Optimise_ATS_{}.{}", stamp_millis, extension)
}

/// French short date as printed in reports (`dd/mm/yyyy`).
pub fn french_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_clean_for_report() {
        assert_eq!(
            clean_for_report("  L' expérience   est claire .\n Bien ,  merci "),
            "L'expérience est claire. Bien, merci"
        );
    }

    #[test]
    fn test_cv_filename_is_deterministic() {
        assert_eq!(
            cv_download_filename("Ahmed  Ben Jelloun", date()),
            "CV_Ahmed_Ben_Jelloun_2024-03-07.docx"
        );
        assert_eq!(cv_download_filename("   ", date()), "CV_CV_2024-03-07.docx");
        assert_eq!(
            cv_download_filename("Sara", date()),
            cv_download_filename("Sara", date())
        );
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(ats_report_filename(72, date()), "Rapport_ATS_72_07-03-2024.pdf");
        assert_eq!(french_date(date()), "07/03/2024");
    }
}
