use crate::app::demo;
use crate::core::client::ApiClient;
use crate::domain::forms::Upload;
use crate::domain::model::CvAnalysisResult;
use crate::domain::ports::PageController;
use crate::domain::view::Outcome;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_upload;
use async_trait::async_trait;

pub const MISSING_INPUT: &str = "Veuillez télécharger un CV ou coller une description de poste.";
pub const DEMO_OFFLINE_NOTICE: &str = "Mode démo activé - données de démonstration";
pub const DEMO_NOTICE: &str = "Mode démo - données de démonstration";

#[derive(Debug, Clone, Default)]
pub struct CvAnalysisForm {
    pub upload: Option<Upload>,
    pub cv_text: String,
    pub job_description: String,
}

/// CV-to-job skill-gap analysis. Any failed call shows the demo analysis instead.
pub struct CvAnalyzerPage {
    client: ApiClient,
    max_upload_bytes: u64,
}

impl CvAnalyzerPage {
    pub fn new(client: ApiClient, max_upload_bytes: u64) -> Self {
        Self {
            client,
            max_upload_bytes,
        }
    }
}

#[async_trait]
impl PageController for CvAnalyzerPage {
    type Form = CvAnalysisForm;
    type Response = CvAnalysisResult;
    type View = CvAnalysisResult;

    fn name(&self) -> &'static str {
        "cv-analyzer"
    }

    fn validate(&self, form: &CvAnalysisForm) -> Result<()> {
        let has_cv = form.upload.is_some() || !form.cv_text.trim().is_empty();
        if !has_cv && form.job_description.trim().is_empty() {
            return Err(AppError::validation("cv", MISSING_INPUT));
        }
        if let Some(upload) = &form.upload {
            validate_upload(upload, self.max_upload_bytes)?;
        }
        Ok(())
    }

    /// Text files are read locally and go through the text endpoint; documents are uploaded.
    async fn call(&self, form: &CvAnalysisForm) -> Result<CvAnalysisResult> {
        match &form.upload {
            Some(upload) if upload.is_plain_text() => {
                let text = String::from_utf8_lossy(&upload.bytes);
                self.client
                    .analyze_cv_text(&text, &form.job_description)
                    .await
            }
            Some(upload) => {
                self.client
                    .analyze_cv_upload(upload, &form.job_description)
                    .await
            }
            None => {
                self.client
                    .analyze_cv_text(&form.cv_text, &form.job_description)
                    .await
            }
        }
    }

    fn present(
        &self,
        _form: &CvAnalysisForm,
        response: CvAnalysisResult,
    ) -> Result<Outcome<CvAnalysisResult>> {
        Ok(Outcome::live(response))
    }

    fn fallback(&self, _form: &CvAnalysisForm, error: &AppError) -> Option<Outcome<CvAnalysisResult>> {
        let notice = if error.is_network() {
            DEMO_OFFLINE_NOTICE
        } else {
            DEMO_NOTICE
        };
        Some(Outcome::demo(demo::sample_analysis(), notice))
    }
}
