use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Backend reported a failure: {message}")]
    Backend { message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Base64 decoding error: {0}")]
    DecodeError(#[from] base64::DecodeError),

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Report error: {message}")]
    Report { message: String },

    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Upload rejected: {message}")]
    Upload { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Input,
    Configuration,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn upload(message: impl Into<String>) -> Self {
        AppError::Upload {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        AppError::Backend {
            message: message.into(),
        }
    }

    /// Maps transport failures onto `Network`; everything else stays a client error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            AppError::Network {
                message: err.to_string(),
            }
        } else {
            AppError::ClientError(err)
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::ClientError(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Network { .. } | AppError::ClientError(_) => ErrorCategory::Network,
            AppError::Http { .. } | AppError::Backend { .. } => ErrorCategory::Backend,
            AppError::Validation { .. } | AppError::Upload { .. } => ErrorCategory::Input,
            AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AppError::ZipError(_)
            | AppError::CsvError(_)
            | AppError::IoError(_)
            | AppError::SerializationError(_)
            | AppError::DecodeError(_)
            | AppError::PdfError(_)
            | AppError::Report { .. } => ErrorCategory::Local,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Backend => ErrorSeverity::Medium,
            ErrorCategory::Local => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::Network { .. } | AppError::ClientError(_) => {
                "Vérifiez que le backend est démarré et que --base-url est correct."
            }
            AppError::Http { status, .. } if *status == StatusCode::NOT_FOUND => {
                "Vérifiez que la version du backend expose bien cet endpoint."
            }
            AppError::Http { status, .. } if *status == StatusCode::UNPROCESSABLE_ENTITY => {
                "Vérifiez les champs envoyés au backend."
            }
            AppError::Http { .. } | AppError::Backend { .. } => {
                "Consultez les logs du backend puis réessayez."
            }
            AppError::Validation { .. } => "Complétez les champs requis puis relancez.",
            AppError::Upload { .. } => "Utilisez un fichier PDF, DOCX, DOC ou TXT de moins de 5MB.",
            AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => {
                "Corrigez le fichier de configuration ou les options."
            }
            AppError::SerializationError(_) => {
                "Vérifiez que la version du backend correspond à celle du client."
            }
            _ => "Vérifiez le répertoire de sortie et les droits d'écriture.",
        }
    }

    /// Short French message shown to the user, paraphrasing the HTTP status.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Http { status, body } => match status.as_u16() {
                404 => "Endpoint non trouvé. Vérifiez que votre backend expose cet endpoint.".to_string(),
                422 => "Format de requête incorrect.".to_string(),
                500..=599 => "Erreur interne du serveur. Vérifiez les logs du backend.".to_string(),
                code => format!("Erreur serveur: {} - {}", code, body),
            },
            AppError::Network { .. } | AppError::ClientError(_) => {
                "Impossible de se connecter au backend. Assurez-vous qu'il est en cours d'exécution.".to_string()
            }
            AppError::SerializationError(_) => {
                "Réponse inattendue du serveur: format de données invalide.".to_string()
            }
            AppError::Backend { message }
            | AppError::Upload { message }
            | AppError::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
