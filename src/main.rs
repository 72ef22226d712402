use career_match::app::pages::assistant::AssistantPage;
use career_match::app::pages::ats_evaluator::{AtsEvaluationForm, AtsEvaluatorPage};
use career_match::app::pages::ats_optimizer::{
    save_optimized_outputs, AtsOptimizationForm, AtsOptimizerPage,
};
use career_match::app::pages::cv_analyzer::{CvAnalysisForm, CvAnalyzerPage};
use career_match::app::pages::cv_builder::{CvBuilder, CvBuilderPage};
use career_match::app::pages::jobs::{JobsPage, JobsQuery, JobsView};
use career_match::app::pages::smart_assistant::{SmartAssistantPage, SmartQuery};
use career_match::app::{export, render};
use career_match::config::toml_config::TomlConfig;
use career_match::domain::forms::{CvForm, Upload};
use career_match::report::ats_report_pdf;
use career_match::utils::error::ErrorSeverity;
use career_match::utils::text::ats_report_filename;
use career_match::utils::{logger, validation::Validate};
use career_match::{
    ApiClient, AppError, CliConfig, Command, ConfigProvider, JobsCommand, LocalStorage,
    PageRunner, Result, Settings, Storage,
};
use clap::Parser;
use std::path::Path;

async fn load_upload(path: &Path) -> Result<Upload> {
    let upload = Upload::from_path(path).await?;
    tracing::debug!("Loaded {} ({:.1} KB, {})", upload.file_name, upload.size_kb(), upload.mime);
    Ok(upload)
}

fn load_cv_form(path: &Path) -> Result<CvForm> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content).map_err(|e| AppError::ConfigValidationError {
            field: path.display().to_string(),
            message: e.to_string(),
        })
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

async fn run(config: CliConfig, settings: Settings) -> Result<()> {
    let client = ApiClient::from_config(&settings)?;
    let storage = LocalStorage::new(settings.output_dir());
    let fallback = settings.fallback_enabled();
    let max_upload = settings.max_upload_bytes();
    let today = chrono::Local::now().date_naive();

    match config.command {
        Command::Search { query, csv } => {
            let runner = PageRunner::with_fallback(AssistantPage::new(client), fallback);
            let outcome = runner.run(&query).await?;
            print!("{}", render::notice(&outcome));
            print!("{}", render::job_cards(&outcome.view));

            if csv && !outcome.view.is_empty() {
                let name = format!("Emplois_{}.csv", chrono::Utc::now().timestamp_millis());
                let path = storage
                    .write_file(&name, &export::jobs_csv(&outcome.view)?)
                    .await?;
                println!("📁 {}", path);
            }
        }
        Command::Ask {
            message,
            clarification,
        } => {
            let runner = PageRunner::with_fallback(SmartAssistantPage::new(client), fallback);
            let outcome = runner
                .run(&SmartQuery {
                    message,
                    clarification,
                })
                .await?;
            print!("{}", render::notice(&outcome));
            print!("{}", render::smart_assistant(&outcome.view));
        }
        Command::Analyze {
            cv,
            cv_text,
            job,
            job_text,
        } => {
            let upload = match cv {
                Some(path) => Some(load_upload(&path).await?),
                None => None,
            };
            let job_description = match (job, job_text) {
                (Some(path), _) => std::fs::read_to_string(path)?,
                (None, Some(text)) => text,
                (None, None) => String::new(),
            };
            let form = CvAnalysisForm {
                upload,
                cv_text: cv_text.unwrap_or_default(),
                job_description,
            };

            let runner =
                PageRunner::with_fallback(CvAnalyzerPage::new(client, max_upload), fallback);
            let outcome = runner.run(&form).await?;
            print!("{}", render::notice(&outcome));
            print!("{}", render::analysis(&outcome.view));
        }
        Command::Evaluate { cv, report } => {
            let upload = load_upload(&cv).await?;
            let file_name = upload.file_name.clone();
            let form = AtsEvaluationForm {
                upload: Some(upload),
                session_id: None,
            };

            let runner =
                PageRunner::with_fallback(AtsEvaluatorPage::new(client, max_upload), fallback);
            let outcome = runner.run(&form).await?;
            print!("{}", render::evaluation(&outcome.view));

            if report {
                let pdf = ats_report_pdf(&outcome.view, &file_name, today)?;
                let name = ats_report_filename(outcome.view.overall_score, today);
                let path = storage.write_file(&name, &pdf).await?;
                println!("📁 {}", path);
            }
        }
        Command::Optimize {
            cv,
            target_role,
            bundle,
        } => {
            let form = AtsOptimizationForm {
                upload: Some(load_upload(&cv).await?),
                target_role,
            };

            let runner =
                PageRunner::with_fallback(AtsOptimizerPage::new(client, max_upload), fallback);
            let outcome = runner.run(&form).await?;
            print!("{}", render::optimized(&outcome.view));

            let stamp = chrono::Utc::now().timestamp_millis();
            for path in save_optimized_outputs(&storage, &outcome.view, stamp, bundle).await? {
                println!("📁 {}", path);
            }
        }
        Command::BuildCv { form } => {
            let mut builder = CvBuilder::from_form(load_cv_form(&form)?);
            builder.check_required()?;
            print!("{}", render::builder_preview(&builder));

            let page = CvBuilderPage::new(client, settings.generate_cv_endpoint(), today);
            let runner = PageRunner::with_fallback(page, fallback);
            let outcome = runner.run(&builder).await?;
            let path = storage
                .write_file(&outcome.view.filename, &outcome.view.bytes)
                .await?;
            print!("{}", render::notice(&outcome));
            println!("📁 {}", path);
        }
        Command::Jobs { command } => {
            let query = match command {
                JobsCommand::All => JobsQuery::All,
                JobsCommand::Search { query, top_k } => JobsQuery::Search { query, top_k },
                JobsCommand::Categories => JobsQuery::Categories,
                JobsCommand::Category { name } => JobsQuery::Category(name),
            };

            let runner = PageRunner::with_fallback(JobsPage::new(client), fallback);
            let outcome = runner.run(&query).await?;
            match &outcome.view {
                JobsView::Cards(cards) => print!("{}", render::job_cards(cards)),
                JobsView::Categories(names) => print!("{}", render::categories(names)),
            }
        }
        Command::Skills => {
            let catalog = client.available_skills().await?;
            print!("{}", render::skills(&catalog));
        }
        Command::Health => {
            if client.test_connection().await {
                println!("✅ Backend connecté ({})", client.base_url());
            } else {
                println!("❌ Backend déconnecté ({})", client.base_url());
                return Err(AppError::Network {
                    message: format!("{} unreachable", client.base_url()),
                });
            }
            match client.cv_module_status().await {
                Ok(status) => println!("✅ Module CV: {}", status),
                Err(e) => println!("⚠️  Module CV: {}", e.user_friendly_message()),
            }
        }
        Command::Debug => {
            for (name, value) in client.debug_endpoints().await {
                let pretty = serde_json::to_string_pretty(&value)?;
                println!("── {}\n{}", name, pretty);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_format);
    tracing::info!("Starting career-match CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let file = match config.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(file) => file,
        Err(e) => exit_with(&e),
    };
    if let Some(Err(e)) = file.as_ref().map(TomlConfig::validate) {
        exit_with(&e);
    }
    let settings = Settings::resolve(file.as_ref(), &config.overrides());

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if let Err(e) = run(config, settings).await {
        exit_with(&e);
    }
}

fn exit_with(e: &AppError) -> ! {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
