pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

pub use config::{cli::LocalStorage, Settings};

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, JobsCommand};

pub use core::{client::ApiClient, runner::PageRunner};
pub use domain::ports::{ConfigProvider, PageController, Storage};
pub use utils::error::{AppError, Result};
