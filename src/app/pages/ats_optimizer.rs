use crate::app::export::optimized_bundle;
use crate::core::client::ApiClient;
use crate::domain::forms::Upload;
use crate::domain::model::AtsOptimizationResult;
use crate::domain::ports::{PageController, Storage};
use crate::domain::view::{OptimizedCv, Outcome};
use crate::utils::error::{AppError, Result};
use crate::utils::text::optimized_cv_filename;
use crate::utils::validation::validate_upload;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

#[derive(Debug, Clone, Default)]
pub struct AtsOptimizationForm {
    pub upload: Option<Upload>,
    pub target_role: Option<String>,
}

pub struct AtsOptimizerPage {
    client: ApiClient,
    max_upload_bytes: u64,
}

impl AtsOptimizerPage {
    pub fn new(client: ApiClient, max_upload_bytes: u64) -> Self {
        Self {
            client,
            max_upload_bytes,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub fn optimized_cv(result: AtsOptimizationResult) -> Result<OptimizedCv> {
    let pdf = match non_blank(result.pdf_base64) {
        Some(encoded) => Some(STANDARD.decode(encoded.trim())?),
        None => None,
    };

    Ok(OptimizedCv {
        text: non_blank(result.ats_cv_text),
        latex: non_blank(result.ats_latex),
        pdf,
        download_url: non_blank(result.download_url),
    })
}

#[async_trait]
impl PageController for AtsOptimizerPage {
    type Form = AtsOptimizationForm;
    type Response = AtsOptimizationResult;
    type View = OptimizedCv;

    fn name(&self) -> &'static str {
        "ats-optimizer"
    }

    fn validate(&self, form: &AtsOptimizationForm) -> Result<()> {
        let upload = form
            .upload
            .as_ref()
            .ok_or_else(|| AppError::validation("cv_file", "Veuillez télécharger un CV."))?;
        validate_upload(upload, self.max_upload_bytes)
    }

    async fn call(&self, form: &AtsOptimizationForm) -> Result<AtsOptimizationResult> {
        let upload = form
            .upload
            .as_ref()
            .ok_or_else(|| AppError::validation("cv_file", "Veuillez télécharger un CV."))?;
        let target_role = form
            .target_role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());
        self.client.ats_optimize(upload, target_role).await
    }

    fn present(
        &self,
        _form: &AtsOptimizationForm,
        response: AtsOptimizationResult,
    ) -> Result<Outcome<OptimizedCv>> {
        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "Erreur lors de l'optimisation.".to_string());
            if let Some(details) = &response.error_details {
                tracing::debug!("Optimization error details: {}", details);
            }
            return Err(AppError::backend(message));
        }
        Ok(Outcome::live(optimized_cv(response)?))
    }
}

/// Writes the `.pdf` and `.tex` downloads, plus the zip bundle when asked.
/// Returns the written paths.
pub async fn save_optimized_outputs<S: Storage>(
    storage: &S,
    cv: &OptimizedCv,
    stamp_millis: i64,
    bundle: bool,
) -> Result<Vec<String>> {
    let mut written = Vec::new();

    if let Some(pdf) = &cv.pdf {
        let name = optimized_cv_filename(stamp_millis, "pdf");
        written.push(storage.write_file(&name, pdf).await?);
    }
    if let Some(latex) = &cv.latex {
        let name = optimized_cv_filename(stamp_millis, "tex");
        written.push(storage.write_file(&name, latex.as_bytes()).await?);
    }
    if bundle && !cv.is_empty() {
        let name = optimized_cv_filename(stamp_millis, "zip");
        let data = optimized_bundle(cv)?;
        tracing::debug!("Writing ZIP bundle ({} bytes) to storage", data.len());
        written.push(storage.write_file(&name, &data).await?);
    }

    Ok(written)
}
