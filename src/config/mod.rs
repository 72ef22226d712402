pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate, DEFAULT_MAX_UPLOAD_BYTES};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 600;
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const DEFAULT_GENERATE_CV_ENDPOINT: &str = "/resume/generate-cv";

/// Fully resolved settings: defaults, then the TOML file, then command-line overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub output_dir: String,
    pub fallback_enabled: bool,
    pub max_upload_bytes: u64,
    pub generate_cv_endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            fallback_enabled: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            generate_cv_endpoint: DEFAULT_GENERATE_CV_ENDPOINT.to_string(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub output_dir: Option<String>,
    pub no_fallback: bool,
}

impl Settings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: &Overrides) -> Self {
        let mut settings = Settings::default();

        if let Some(file) = file {
            if let Some(url) = &file.backend.base_url {
                settings.base_url = url.clone();
            }
            if let Some(timeout) = file.backend.timeout_seconds {
                settings.timeout_seconds = timeout;
            }
            if let Some(endpoint) = &file.backend.generate_cv_endpoint {
                settings.generate_cv_endpoint = endpoint.clone();
            }
            if let Some(output) = &file.output {
                settings.output_dir = output.dir.clone();
            }
            if let Some(fallback) = &file.fallback {
                settings.fallback_enabled = fallback.enabled;
            }
            if let Some(upload) = &file.upload {
                settings.max_upload_bytes = upload.max_bytes;
            }
        }

        if let Some(url) = &overrides.base_url {
            settings.base_url = url.clone();
        }
        if let Some(timeout) = overrides.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(dir) = &overrides.output_dir {
            settings.output_dir = dir.clone();
        }
        if overrides.no_fallback {
            settings.fallback_enabled = false;
        }

        settings
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        validation::validate_positive_number("max_upload_bytes", self.max_upload_bytes, 1)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }

    fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    fn generate_cv_endpoint(&self) -> &str {
        &self.generate_cv_endpoint
    }
}

#[cfg(feature = "cli")]
pub use args::{CliConfig, Command, JobsCommand};

#[cfg(feature = "cli")]
mod args {
    use super::Overrides;
    use crate::utils::logger::LogFormat;
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "career-match")]
    #[command(about = "Job search, CV analysis and ATS tools backed by the career-match API")]
    pub struct CliConfig {
        /// Backend base URL (default http://localhost:8000)
        #[arg(long, global = true)]
        pub base_url: Option<String>,

        /// Optional TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<PathBuf>,

        /// Directory receiving downloaded and generated files
        #[arg(long, global = true)]
        pub output_dir: Option<String>,

        /// Request timeout in seconds
        #[arg(long, global = true)]
        pub timeout: Option<u64>,

        /// Never substitute demo data when the backend fails
        #[arg(long, global = true)]
        pub no_fallback: bool,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, value_enum, default_value = "compact")]
        pub log_format: LogFormat,

        #[command(subcommand)]
        pub command: Command,
    }

    impl CliConfig {
        pub fn overrides(&self) -> Overrides {
            Overrides {
                base_url: self.base_url.clone(),
                timeout_seconds: self.timeout,
                output_dir: self.output_dir.clone(),
                no_fallback: self.no_fallback,
            }
        }
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Natural-language job search
        Search {
            query: String,
            /// Also write the result cards as CSV into the output directory
            #[arg(long)]
            csv: bool,
        },
        /// Conversational assistant with clarification support
        Ask {
            message: String,
            #[arg(long)]
            clarification: Option<String>,
        },
        /// Compare a CV against a job description
        Analyze {
            #[arg(long)]
            cv: Option<PathBuf>,
            #[arg(long)]
            cv_text: Option<String>,
            #[arg(long)]
            job: Option<PathBuf>,
            #[arg(long)]
            job_text: Option<String>,
        },
        /// Score a resume on the 14 ATS categories
        Evaluate {
            cv: PathBuf,
            /// Write the PDF report into the output directory
            #[arg(long)]
            report: bool,
        },
        /// Rewrite a resume for ATS parsing
        Optimize {
            cv: PathBuf,
            #[arg(long)]
            target_role: Option<String>,
            /// Pack every returned format into one zip
            #[arg(long)]
            bundle: bool,
        },
        /// Generate a CV document from a JSON or TOML form file
        BuildCv { form: PathBuf },
        /// Browse the job catalogue
        Jobs {
            #[command(subcommand)]
            command: JobsCommand,
        },
        /// List the technical skills known to the CV analyzer
        Skills,
        /// Check that the backend and its CV module answer
        Health,
        /// Probe every known endpoint and print the raw answers
        Debug,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum JobsCommand {
        All,
        Search {
            query: String,
            #[arg(long, default_value = "5")]
            top_k: u32,
        },
        Categories,
        Category { name: String },
    }
}
