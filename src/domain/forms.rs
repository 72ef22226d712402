use serde::{Deserialize, Serialize};
use std::path::Path;

/// A file picked by the user, held in memory until it is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("cv")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }

    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }

    pub fn is_plain_text(&self) -> bool {
        self.mime == "text/plain"
    }
}

// ===== CV builder form =====

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EducationEntry {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LanguageEntry {
    pub language: String,
    pub level: String,
}

/// Raw builder input as typed by the user, or loaded from a JSON/TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CvForm {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<ExperienceEntry>,
    pub educations: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub languages: Vec<LanguageEntry>,
    pub projects: Vec<serde_json::Value>,
    pub certifications: Vec<serde_json::Value>,
    pub achievements: Vec<String>,
    pub hobbies: Vec<String>,
}

/// Cleaned builder data, ready to be JSON-stringified field by field.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GenerateCvPayload {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<ExperienceEntry>,
    pub educations: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub languages: Vec<LanguageEntry>,
    pub summary: String,
    pub projects: Vec<serde_json::Value>,
    pub certifications: Vec<serde_json::Value>,
    pub achievements: Vec<String>,
    pub hobbies: Vec<String>,
}
