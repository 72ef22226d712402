//! Step-by-step CV builder and document generation.
//!
//! `CvBuilder` holds the editable form and the current step. `CvBuilderPage` turns a form
//! into a generation request and names the returned document.

use crate::core::client::ApiClient;
use crate::domain::forms::{
    CvForm, EducationEntry, ExperienceEntry, GenerateCvPayload, LanguageEntry, PersonalInfo,
};
use crate::domain::ports::PageController;
use crate::domain::view::Outcome;
use crate::utils::error::{AppError, Result};
use crate::utils::text::cv_download_filename;
use async_trait::async_trait;
use chrono::NaiveDate;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 6;
pub const DEFAULT_LANGUAGE_LEVEL: &str = "Intermédiaire";

pub const STEP_TITLES: [&str; 6] = [
    "Informations",
    "Expérience",
    "Formation",
    "Compétences",
    "Langues",
    "Aperçu",
];

const NAME_REQUIRED: &str = "Le nom complet est requis";
const EMAIL_REQUIRED: &str = "L'email est requis";

fn new_entry_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn blank_experience() -> ExperienceEntry {
    ExperienceEntry {
        id: new_entry_id(),
        ..Default::default()
    }
}

fn blank_education() -> EducationEntry {
    EducationEntry {
        id: new_entry_id(),
        ..Default::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CvBuilder {
    form: CvForm,
    step: u8,
    error: Option<String>,
    success: Option<String>,
}

impl Default for CvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CvBuilder {
    pub fn new() -> Self {
        Self::from_form(CvForm::default())
    }

    /// Starts from a pre-filled form. Empty lists get their single blank entry and skills
    /// are trimmed and deduplicated.
    pub fn from_form(mut form: CvForm) -> Self {
        form.skills = normalized_skills(&form.skills);
        if form.experiences.is_empty() {
            form.experiences.push(blank_experience());
        }
        if form.educations.is_empty() {
            form.educations.push(blank_education());
        }
        if form.languages.is_empty() {
            form.languages.push(LanguageEntry::default());
        }
        Self {
            form,
            step: FIRST_STEP,
            error: None,
            success: None,
        }
    }

    pub fn form(&self) -> &CvForm {
        &self.form
    }

    pub fn personal_info_mut(&mut self) -> &mut PersonalInfo {
        &mut self.form.personal_info
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn step_title(&self) -> &'static str {
        STEP_TITLES[(self.step - FIRST_STEP) as usize]
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.error = None;
        self.success = Some(message.into());
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.success = None;
        self.error = Some(message.into());
    }

    fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn next(&mut self) {
        self.step = (self.step + 1).min(LAST_STEP);
        self.clear_messages();
    }

    pub fn prev(&mut self) {
        self.step = self.step.saturating_sub(1).max(FIRST_STEP);
        self.clear_messages();
    }

    // ===== Lists =====

    pub fn add_experience(&mut self) -> &mut ExperienceEntry {
        self.form.experiences.push(blank_experience());
        let last = self.form.experiences.len() - 1;
        &mut self.form.experiences[last]
    }

    pub fn experience_mut(&mut self, index: usize) -> Option<&mut ExperienceEntry> {
        self.form.experiences.get_mut(index)
    }

    /// Ignored when it would leave the list empty.
    pub fn remove_experience(&mut self, index: usize) {
        if self.form.experiences.len() > 1 && index < self.form.experiences.len() {
            self.form.experiences.remove(index);
        }
    }

    pub fn add_education(&mut self) -> &mut EducationEntry {
        self.form.educations.push(blank_education());
        let last = self.form.educations.len() - 1;
        &mut self.form.educations[last]
    }

    pub fn education_mut(&mut self, index: usize) -> Option<&mut EducationEntry> {
        self.form.educations.get_mut(index)
    }

    pub fn remove_education(&mut self, index: usize) {
        if self.form.educations.len() > 1 && index < self.form.educations.len() {
            self.form.educations.remove(index);
        }
    }

    pub fn add_language(&mut self) -> &mut LanguageEntry {
        self.form.languages.push(LanguageEntry::default());
        let last = self.form.languages.len() - 1;
        &mut self.form.languages[last]
    }

    pub fn language_mut(&mut self, index: usize) -> Option<&mut LanguageEntry> {
        self.form.languages.get_mut(index)
    }

    pub fn remove_language(&mut self, index: usize) {
        if self.form.languages.len() > 1 && index < self.form.languages.len() {
            self.form.languages.remove(index);
        }
    }

    /// Returns false when the skill is blank or already listed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.form.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.form.skills.push(skill.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.form.skills.retain(|s| s != skill);
    }

    // ===== Generation =====

    /// Name then email. On failure the builder goes back to the first step.
    pub fn check_required(&mut self) -> Result<()> {
        let info = &self.form.personal_info;
        let missing = if info.full_name.trim().is_empty() {
            Some(("fullName", NAME_REQUIRED))
        } else if info.email.trim().is_empty() {
            Some(("email", EMAIL_REQUIRED))
        } else {
            None
        };

        if let Some((field, message)) = missing {
            self.step = FIRST_STEP;
            self.set_error(message);
            return Err(AppError::validation(field, message));
        }
        Ok(())
    }

    pub fn payload(&self) -> GenerateCvPayload {
        build_payload(&self.form)
    }
}

/// Trimmed, non-blank, first occurrence kept.
fn normalized_skills(skills: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills.iter().map(|s| s.trim()) {
        if !skill.is_empty() && !out.iter().any(|s| s == skill) {
            out.push(skill.to_string());
        }
    }
    out
}

fn trimmed_personal_info(info: &PersonalInfo) -> PersonalInfo {
    PersonalInfo {
        full_name: info.full_name.trim().to_string(),
        email: info.email.trim().to_string(),
        phone: info.phone.trim().to_string(),
        location: info.location.trim().to_string(),
        linkedin: info.linkedin.trim().to_string(),
        summary: info.summary.trim().to_string(),
    }
}

/// Drops entries the user left blank and fills the language level default.
pub fn build_payload(form: &CvForm) -> GenerateCvPayload {
    let personal_info = trimmed_personal_info(&form.personal_info);

    let experiences = form
        .experiences
        .iter()
        .filter(|e| !e.company.trim().is_empty() || !e.position.trim().is_empty())
        .map(|e| ExperienceEntry {
            description: e.description.trim().to_string(),
            ..e.clone()
        })
        .collect();

    let educations = form
        .educations
        .iter()
        .filter(|e| !e.institution.trim().is_empty() || !e.degree.trim().is_empty())
        .cloned()
        .collect();

    let languages = form
        .languages
        .iter()
        .filter(|l| !l.language.trim().is_empty())
        .map(|l| LanguageEntry {
            language: l.language.trim().to_string(),
            level: if l.level.trim().is_empty() {
                DEFAULT_LANGUAGE_LEVEL.to_string()
            } else {
                l.level.trim().to_string()
            },
        })
        .collect();

    let skills = normalized_skills(&form.skills);

    GenerateCvPayload {
        summary: personal_info.summary.clone(),
        personal_info,
        experiences,
        educations,
        skills,
        languages,
        projects: form.projects.clone(),
        certifications: form.certifications.clone(),
        achievements: form.achievements.clone(),
        hobbies: form.hobbies.clone(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCv {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct CvBuilderPage {
    client: ApiClient,
    endpoint: String,
    date: NaiveDate,
}

impl CvBuilderPage {
    /// `date` is the one stamped into the download name.
    pub fn new(client: ApiClient, endpoint: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            date,
        }
    }
}

#[async_trait]
impl PageController for CvBuilderPage {
    type Form = CvBuilder;
    type Response = Vec<u8>;
    type View = GeneratedCv;

    fn name(&self) -> &'static str {
        "cv-builder"
    }

    fn validate(&self, builder: &CvBuilder) -> Result<()> {
        let info = &builder.form().personal_info;
        if info.full_name.trim().is_empty() {
            return Err(AppError::validation("fullName", NAME_REQUIRED));
        }
        if info.email.trim().is_empty() {
            return Err(AppError::validation("email", EMAIL_REQUIRED));
        }
        Ok(())
    }

    async fn call(&self, builder: &CvBuilder) -> Result<Vec<u8>> {
        self.client
            .generate_cv(&builder.payload(), &self.endpoint)
            .await
    }

    fn present(&self, builder: &CvBuilder, bytes: Vec<u8>) -> Result<Outcome<GeneratedCv>> {
        let filename = cv_download_filename(&builder.form().personal_info.full_name, self.date);
        Ok(Outcome::live(GeneratedCv { filename, bytes })
            .with_notice("CV généré et téléchargé avec succès!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_clamped() {
        let mut builder = CvBuilder::new();
        builder.prev();
        assert_eq!(builder.step(), 1);
        assert_eq!(builder.step_title(), "Informations");

        for _ in 0..10 {
            builder.next();
        }
        assert_eq!(builder.step(), 6);
        assert_eq!(builder.step_title(), "Aperçu");
    }

    #[test]
    fn test_navigation_clears_messages() {
        let mut builder = CvBuilder::new();
        builder.set_error("oops");
        builder.next();
        assert!(builder.error().is_none());
        assert!(builder.success().is_none());
    }

    #[test]
    fn test_lists_keep_one_entry() {
        let mut builder = CvBuilder::new();
        builder.remove_experience(0);
        builder.remove_education(0);
        builder.remove_language(0);
        assert_eq!(builder.form().experiences.len(), 1);
        assert_eq!(builder.form().educations.len(), 1);
        assert_eq!(builder.form().languages.len(), 1);

        builder.add_experience().company = "OCP".into();
        builder.remove_experience(0);
        assert_eq!(builder.form().experiences.len(), 1);
        assert_eq!(builder.form().experiences[0].company, "OCP");
    }

    #[test]
    fn test_success_and_error_exclude_each_other() {
        let mut builder = CvBuilder::new();
        builder.set_error("Le nom complet est requis");
        builder.set_success("CV généré et téléchargé avec succès!");
        assert!(builder.error().is_none());
        assert_eq!(builder.success(), Some("CV généré et téléchargé avec succès!"));

        builder.set_error("Erreur");
        assert!(builder.success().is_none());
    }

    #[test]
    fn test_entries_are_edited_in_place() {
        let mut builder = CvBuilder::new();
        builder.experience_mut(0).unwrap().company = "OCP".into();
        builder.education_mut(0).unwrap().institution = "ENSIAS".into();
        let master = builder.add_education();
        master.degree = "Master".into();
        master.field = "Data".into();

        assert!(builder.education_mut(5).is_none());
        let form = builder.form();
        assert_eq!(form.experiences[0].company, "OCP");
        assert_eq!(form.educations.len(), 2);
        assert_ne!(form.educations[0].id, form.educations[1].id);

        let payload = builder.payload();
        assert_eq!(payload.educations.len(), 2);
        assert_eq!(payload.educations[1].degree, "Master");
    }

    #[test]
    fn test_loaded_skills_are_normalized() {
        let form: CvForm = serde_json::from_value(serde_json::json!({
            "skills": ["Rust", " Rust ", "SQL", "SQL", "  "]
        }))
        .unwrap();

        let builder = CvBuilder::from_form(form.clone());
        assert_eq!(builder.form().skills, vec!["Rust", "SQL"]);
        assert_eq!(build_payload(&form).skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_experience_description_is_trimmed() {
        let mut builder = CvBuilder::new();
        let entry = builder.experience_mut(0).unwrap();
        entry.company = "OCP".into();
        entry.description = "  Pilotage des flux \n".into();

        let payload = builder.payload();
        assert_eq!(payload.experiences[0].description, "Pilotage des flux");
        assert_eq!(payload.experiences[0].company, "OCP");
    }

    #[test]
    fn test_skills_trimmed_and_unique() {
        let mut builder = CvBuilder::new();
        assert!(builder.add_skill("  Rust "));
        assert!(!builder.add_skill("Rust"));
        assert!(!builder.add_skill("   "));
        assert_eq!(builder.form().skills, vec!["Rust".to_string()]);

        builder.remove_skill("Rust");
        assert!(builder.form().skills.is_empty());
    }

    #[test]
    fn test_required_fields_send_back_to_first_step() {
        let mut builder = CvBuilder::new();
        builder.next();
        builder.next();

        let err = builder.check_required().unwrap_err();
        assert_eq!(err.user_friendly_message(), "Le nom complet est requis");
        assert_eq!(builder.step(), 1);

        builder.personal_info_mut().full_name = "Sara Alaoui".into();
        let err = builder.check_required().unwrap_err();
        assert_eq!(err.user_friendly_message(), "L'email est requis");

        builder.personal_info_mut().email = "sara@example.ma".into();
        assert!(builder.check_required().is_ok());
    }

    #[test]
    fn test_payload_filters_blank_entries() {
        let mut builder = CvBuilder::new();
        builder.personal_info_mut().full_name = "  Sara Alaoui ".into();
        builder.personal_info_mut().summary = "Ingénieure data".into();
        builder.add_experience().position = "Data Engineer".into();
        builder.language_mut(0).unwrap().language = "Arabe".into();
        builder.add_language().language = " ".into();
        let english = builder.add_language();
        english.language = "Anglais".into();
        english.level = "Courant".into();

        let payload = builder.payload();

        assert_eq!(payload.personal_info.full_name, "Sara Alaoui");
        assert_eq!(payload.summary, "Ingénieure data");
        assert_eq!(payload.experiences.len(), 1);
        assert!(payload.educations.is_empty());
        assert_eq!(payload.languages.len(), 2);
        assert_eq!(payload.languages[0].level, "Intermédiaire");
        assert_eq!(payload.languages[1].level, "Courant");
        assert!(payload.projects.is_empty());
    }
}
