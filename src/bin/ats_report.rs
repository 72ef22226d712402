use anyhow::Context;
use career_match::app::pages::ats_evaluator::evaluation_result;
use career_match::domain::model::AtsResponse;
use career_match::report::ats_report_pdf;
use career_match::utils::logger::{self, LogFormat};
use career_match::utils::text::ats_report_filename;
use career_match::{LocalStorage, Storage};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Renders the PDF report from a saved `/api/ats_evaluate` answer, without calling the backend.
#[derive(Parser)]
#[command(name = "ats-report")]
#[command(about = "Render an ATS evaluation report from a saved JSON answer")]
struct Args {
    /// JSON body returned by the evaluation endpoint
    input: PathBuf,

    /// Name of the evaluated CV, shown in the report
    #[arg(long, default_value = "CV_analyse")]
    file_name: String,

    /// Report date (YYYY-MM-DD), today by default
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long, default_value = "./output")]
    output_dir: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose, LogFormat::Compact);

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let response: AtsResponse = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not an ATS evaluation answer", args.input.display()))?;
    if !response.success {
        anyhow::bail!(
            "evaluation failed: {}",
            response.error.as_deref().unwrap_or("unknown error")
        );
    }

    let result = evaluation_result(response);
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::info!(
        "Rendering report for {} ({} categories)",
        args.file_name,
        result.categories.len()
    );

    let pdf = ats_report_pdf(&result, &args.file_name, date)?;
    let storage = LocalStorage::new(args.output_dir);
    let path = storage
        .write_file(&ats_report_filename(result.overall_score, date), &pdf)
        .await?;

    println!("📁 {}", path);
    Ok(())
}
