use crate::domain::forms::Upload;
use crate::utils::error::{AppError, Result};
use url::Url;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "text/plain",
];

pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(AppError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(AppError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AppError::validation(
            field_name,
            format!("La valeur doit être comprise entre {} et {}", min, max),
        ));
    }
    Ok(())
}

/// Rejects blank form fields with the given user-facing message.
pub fn require_text(field_name: &str, value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(field_name, message));
    }
    Ok(())
}

/// Human-readable size limit, rounded up so a small limit never reads as zero.
fn size_limit_label(max_bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if max_bytes >= MIB {
        format!("{}MB", max_bytes.div_ceil(MIB))
    } else {
        format!("{}KB", max_bytes.div_ceil(1024))
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Upload gate applied before any request leaves the client.
///
/// A file passes the type check when either its MIME type or its extension is accepted.
pub fn validate_upload(upload: &Upload, max_bytes: u64) -> Result<()> {
    let size = upload.bytes.len() as u64;
    if size == 0 {
        return Err(AppError::upload("Le fichier est vide."));
    }

    if size > max_bytes {
        return Err(AppError::upload(format!(
            "Le fichier est trop volumineux (max {})",
            size_limit_label(max_bytes)
        )));
    }

    let mime_ok = ACCEPTED_MIME_TYPES.contains(&upload.mime.as_str());
    let ext_ok = extension_of(&upload.file_name)
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);

    if !mime_ok && !ext_ok {
        return Err(AppError::upload(
            "Format de fichier non supporté. Utilisez PDF, DOCX, DOC ou TXT.",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, mime: &str, len: usize) -> Upload {
        Upload {
            file_name: name.to_string(),
            mime: mime.to_string(),
            bytes: vec![b'a'; len],
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("backend.base_url", "https://example.com").is_ok());
        assert!(validate_url("backend.base_url", "http://localhost:8000").is_ok());
        assert!(matches!(
            validate_url("backend.base_url", "  "),
            Err(AppError::MissingConfigError { .. })
        ));
        assert!(validate_url("backend.base_url", "invalid-url").is_err());
        assert!(validate_url("backend.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_upload_size_limit() {
        let limit = DEFAULT_MAX_UPLOAD_BYTES as usize;
        assert!(validate_upload(&upload("cv.pdf", "application/pdf", limit), DEFAULT_MAX_UPLOAD_BYTES).is_ok());

        let err = validate_upload(
            &upload("cv.pdf", "application/pdf", limit + 1),
            DEFAULT_MAX_UPLOAD_BYTES,
        )
        .unwrap_err();
        assert_eq!(err.user_friendly_message(), "Le fichier est trop volumineux (max 5MB)");
    }

    #[test]
    fn test_small_limit_is_not_reported_as_zero() {
        let err = validate_upload(&upload("cv.pdf", "application/pdf", 600 * 1024), 512 * 1024)
            .unwrap_err();
        assert_eq!(err.user_friendly_message(), "Le fichier est trop volumineux (max 512KB)");

        let err = validate_upload(
            &upload("cv.pdf", "application/pdf", 2 * 1024 * 1024),
            1536 * 1024,
        )
        .unwrap_err();
        assert_eq!(err.user_friendly_message(), "Le fichier est trop volumineux (max 2MB)");
    }

    #[test]
    fn test_empty_output_dir_is_missing_config() {
        let err = validate_path("output_dir", "").unwrap_err();
        assert_eq!(err.to_string(), "Missing required configuration: output_dir");
    }

    #[test]
    fn test_upload_type_by_mime_or_extension() {
        // extension alone is enough
        assert!(validate_upload(&upload("CV.DOCX", "application/octet-stream", 10), 1024).is_ok());
        // mime alone is enough
        assert!(validate_upload(&upload("resume", "text/plain", 10), 1024).is_ok());

        let err = validate_upload(&upload("photo.png", "image/png", 10), 1024).unwrap_err();
        assert!(matches!(err, AppError::Upload { .. }));
    }

    #[test]
    fn test_empty_upload_rejected() {
        assert!(validate_upload(&upload("cv.txt", "text/plain", 0), 1024).is_err());
    }
}
