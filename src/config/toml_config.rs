use crate::utils::error::{AppError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    pub output: Option<OutputConfig>,
    pub fallback: Option<FallbackConfig>,
    pub upload: Option<UploadConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub generate_cv_endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_bytes: u64,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(url) = &self.backend.base_url {
            crate::utils::validation::validate_url("backend.base_url", url)?;
        }

        if let Some(timeout) = self.backend.timeout_seconds {
            crate::utils::validation::validate_positive_number("backend.timeout_seconds", timeout, 1)?;
        }

        if let Some(endpoint) = &self.backend.generate_cv_endpoint {
            if !endpoint.starts_with('/') {
                return Err(AppError::InvalidConfigValueError {
                    field: "backend.generate_cv_endpoint".to_string(),
                    value: endpoint.clone(),
                    reason: "Endpoint must start with '/'".to_string(),
                });
            }
        }

        if let Some(output) = &self.output {
            crate::utils::validation::validate_path("output.dir", &output.dir)?;
        }

        if let Some(upload) = &self.upload {
            crate::utils::validation::validate_positive_number("upload.max_bytes", upload.max_bytes, 1)?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
