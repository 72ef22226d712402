use crate::domain::view::Outcome;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Writes `data` under the storage root and returns the full path written.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn output_dir(&self) -> &str;
    fn fallback_enabled(&self) -> bool;
    fn max_upload_bytes(&self) -> u64;
    fn generate_cv_endpoint(&self) -> &str;
}

/// A page: local validation, one backend call, mapping of the answer into a view.
#[async_trait]
pub trait PageController: Send + Sync {
    type Form: Send + Sync;
    type Response: Send;
    type View: Send;

    fn name(&self) -> &'static str;

    /// Runs before any network traffic.
    fn validate(&self, form: &Self::Form) -> Result<()>;

    async fn call(&self, form: &Self::Form) -> Result<Self::Response>;

    fn present(&self, form: &Self::Form, response: Self::Response) -> Result<Outcome<Self::View>>;

    /// Static replacement view for a failed call. Most pages have none.
    fn fallback(&self, _form: &Self::Form, _error: &AppError) -> Option<Outcome<Self::View>> {
        None
    }
}
