//! Shared HTTP client for the career-match backend.
//!
//! Every call issues exactly one request. Non-2xx answers become `AppError::Http` carrying the
//! response text; transport failures become `AppError::Network`. Nothing is retried.

use crate::domain::forms::{GenerateCvPayload, Upload};
use crate::domain::model::{
    AssistantResponse, AtsOptimizationResult, AtsResponse, CvAnalysisResult, Job, SearchResults,
    SkillsCatalog, SmartAssistantResponse,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

const ASSISTANT_ENDPOINT: &str = "/api/assistant";
const ASSISTANT_ASK_ENDPOINT: &str = "/api/assistant/ask";
const SMART_ASSISTANT_ENDPOINT: &str = "/api/smart-assistant";
const SEARCH_ENDPOINT: &str = "/api/search";
const CLARIFY_ENDPOINT: &str = "/api/clarify";
const RESULTS_ENDPOINT: &str = "/api/results";
const JOBS_ALL_ENDPOINT: &str = "/jobs/all";
const JOBS_SEARCH_ENDPOINT: &str = "/jobs/search";
const JOBS_CATEGORIES_ENDPOINT: &str = "/jobs/categories";
const JOBS_CATEGORY_ENDPOINT: &str = "/jobs/category";
const CV_ANALYZE_ENDPOINT: &str = "/cv/analyze";
const CV_ANALYZE_UPLOAD_ENDPOINT: &str = "/cv/analyze-upload";
const CV_TEST_ENDPOINT: &str = "/cv/test";
const CV_SKILLS_ENDPOINT: &str = "/cv/skills";
const ATS_EVALUATE_ENDPOINT: &str = "/api/ats_evaluate";
const ATS_CV_ENDPOINT: &str = "/api/ats_cv";

pub const DEFAULT_TOP_K: u32 = 5;

/// `session_{unix_millis}_{9 lowercase alphanumerics}`
pub fn generate_session_id() -> String {
    let suffix: String = uuid::Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("session_{}_{}", chrono::Utc::now().timestamp_millis(), suffix)
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| AppError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.base_url(), Duration::from_secs(config.timeout_seconds()))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn url(&self, endpoint: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url(), endpoint);
        Url::parse(&raw).map_err(|e| AppError::InvalidConfigValueError {
            field: "endpoint".to_string(),
            value: raw,
            reason: e.to_string(),
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(AppError::from_transport)?;
        let status = response.status();
        tracing::debug!("Response status: {} ({})", status, response.url());

        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Impossible de lire le message d'erreur".to_string());
        tracing::error!("API error {}: {}", status, body);
        Err(AppError::Http { status, body })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let text = response.text().await.map_err(AppError::from_transport)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn file_part(upload: &Upload) -> Result<Part> {
        Ok(Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)?)
    }

    // ===== Connectivity =====

    /// `GET /` answered with 2xx. Any failure counts as disconnected.
    pub async fn test_connection(&self) -> bool {
        let Ok(url) = self.url("/") else {
            return false;
        };
        match self.http.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::warn!("Backend connection test failed: {}", e);
                false
            }
        }
    }

    pub async fn cv_module_status(&self) -> Result<serde_json::Value> {
        let url = self.url(CV_TEST_ENDPOINT)?;
        self.send_json(self.http.get(url)).await
    }

    pub async fn available_skills(&self) -> Result<SkillsCatalog> {
        let url = self.url(CV_SKILLS_ENDPOINT)?;
        self.send_json(self.http.get(url)).await
    }

    // ===== Assistant =====

    /// The assistant reads `message` from the query string, not from a body.
    pub async fn assistant_search(&self, message: &str) -> Result<AssistantResponse> {
        let url = self.url(ASSISTANT_ENDPOINT)?;
        tracing::debug!("API Request: POST {} message={:?}", url, message);
        self.send_json(self.http.post(url).query(&[("message", message)]))
            .await
    }

    pub async fn assistant_ask(&self, query: &str) -> Result<AssistantResponse> {
        let url = self.url(ASSISTANT_ASK_ENDPOINT)?;
        self.send_json(self.http.post(url).json(&serde_json::json!({ "query": query })))
            .await
    }

    pub async fn smart_assistant(
        &self,
        message: &str,
        clarification: Option<&str>,
    ) -> Result<SmartAssistantResponse> {
        let url = self.url(SMART_ASSISTANT_ENDPOINT)?;
        let mut params = vec![("message", message)];
        if let Some(answer) = clarification {
            params.push(("clarification", answer));
        }
        self.send_json(self.http.post(url).query(&params)).await
    }

    pub async fn search(&self, query: &str, session_id: Option<&str>) -> Result<SearchResults> {
        let url = self.url(SEARCH_ENDPOINT)?;
        let session_id = session_id
            .map(str::to_string)
            .unwrap_or_else(generate_session_id);
        let body = serde_json::json!({ "query": query, "session_id": session_id });
        self.send_json(self.http.post(url).json(&body)).await
    }

    pub async fn clarify(&self, answer: &str, session_id: &str) -> Result<SearchResults> {
        let url = self.url(CLARIFY_ENDPOINT)?;
        let body = serde_json::json!({ "session_id": session_id, "answer": answer });
        self.send_json(self.http.post(url).json(&body)).await
    }

    pub async fn last_results(&self, session_id: &str) -> Result<SearchResults> {
        let url = self.url(RESULTS_ENDPOINT)?;
        self.send_json(self.http.get(url).query(&[("session_id", session_id)]))
            .await
    }

    // ===== Jobs =====

    pub async fn all_jobs(&self) -> Result<Vec<Job>> {
        let url = self.url(JOBS_ALL_ENDPOINT)?;
        self.send_json(self.http.get(url)).await
    }

    pub async fn search_jobs(&self, query: &str, top_k: u32) -> Result<SearchResults> {
        let url = self.url(JOBS_SEARCH_ENDPOINT)?;
        let top_k = top_k.to_string();
        self.send_json(
            self.http
                .get(url)
                .query(&[("query", query), ("top_k", top_k.as_str())]),
        )
        .await
    }

    pub async fn job_categories(&self) -> Result<Vec<String>> {
        let url = self.url(JOBS_CATEGORIES_ENDPOINT)?;
        self.send_json(self.http.get(url)).await
    }

    /// The category travels as a single percent-encoded path segment.
    fn category_url(&self, category: &str) -> Result<Url> {
        let mut url = self.url(JOBS_CATEGORY_ENDPOINT)?;
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: self.base_url().to_string(),
                reason: "URL cannot carry path segments".to_string(),
            })?
            .push(category);
        Ok(url)
    }

    pub async fn jobs_by_category(&self, category: &str) -> Result<Vec<Job>> {
        let url = self.category_url(category)?;
        self.send_json(self.http.get(url)).await
    }

    // ===== CV analysis =====

    pub async fn analyze_cv_text(
        &self,
        cv_text: &str,
        job_description: &str,
    ) -> Result<CvAnalysisResult> {
        let url = self.url(CV_ANALYZE_ENDPOINT)?;
        tracing::info!("Analyzing CV text ({} chars)", cv_text.len());
        self.send_json(
            self.http
                .post(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .form(&[("cv_text", cv_text), ("job_description", job_description)]),
        )
        .await
    }

    pub async fn analyze_cv_upload(
        &self,
        upload: &Upload,
        job_description: &str,
    ) -> Result<CvAnalysisResult> {
        let url = self.url(CV_ANALYZE_UPLOAD_ENDPOINT)?;
        tracing::info!("Analyzing CV upload {}", upload.file_name);
        let form = Form::new()
            .part("cv_file", Self::file_part(upload)?)
            .text("job_description", job_description.to_string());
        self.send_json(
            self.http
                .post(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .multipart(form),
        )
        .await
    }

    // ===== ATS =====

    pub async fn ats_evaluate(
        &self,
        upload: Option<&Upload>,
        cv_text: Option<&str>,
        session_id: Option<&str>,
    ) -> Result<AtsResponse> {
        let url = self.url(ATS_EVALUATE_ENDPOINT)?;
        let mut form = Form::new();
        if let Some(upload) = upload {
            tracing::info!(
                "Sending CV file for ATS evaluation: {} ({} bytes)",
                upload.file_name,
                upload.bytes.len()
            );
            form = form.part("cv_file", Self::file_part(upload)?);
        }
        if let Some(text) = cv_text {
            form = form.text("cv_text", text.to_string());
        }
        if let Some(session_id) = session_id {
            form = form.text("session_id", session_id.to_string());
        }
        self.send_json(self.http.post(url).multipart(form)).await
    }

    /// Error answers of this endpoint are JSON carrying `error` or `detail`; that message
    /// replaces the raw body.
    pub async fn ats_optimize(
        &self,
        upload: &Upload,
        target_role: Option<&str>,
    ) -> Result<AtsOptimizationResult> {
        let url = self.url(ATS_CV_ENDPOINT)?;
        let form = Form::new()
            .part("cv_file", Self::file_part(upload)?)
            .text("target_role", target_role.unwrap_or_default().to_string());

        match self.send_json(self.http.post(url).multipart(form)).await {
            Err(AppError::Http { status, body }) => {
                let message = serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .and_then(|v| {
                        v.get("error")
                            .or_else(|| v.get("detail"))
                            .and_then(|m| m.as_str())
                            .map(str::to_string)
                    })
                    .unwrap_or(body);
                Err(AppError::Http {
                    status,
                    body: message,
                })
            }
            other => other,
        }
    }

    // ===== CV generation =====

    /// Structured fields travel JSON-stringified inside a multipart form; the answer is the
    /// raw document.
    pub async fn generate_cv(&self, payload: &GenerateCvPayload, endpoint: &str) -> Result<Vec<u8>> {
        let url = self.url(endpoint)?;
        let form = Form::new()
            .text("personal_info", serde_json::to_string(&payload.personal_info)?)
            .text("experiences", serde_json::to_string(&payload.experiences)?)
            .text("educations", serde_json::to_string(&payload.educations)?)
            .text("skills", serde_json::to_string(&payload.skills)?)
            .text("languages", serde_json::to_string(&payload.languages)?)
            .text("summary", payload.summary.clone())
            .text("projects", serde_json::to_string(&payload.projects)?)
            .text("certifications", serde_json::to_string(&payload.certifications)?)
            .text("achievements", serde_json::to_string(&payload.achievements)?)
            .text("hobbies", serde_json::to_string(&payload.hobbies)?);

        tracing::info!("Sending CV generation request to {}", url);
        let response = self.send(self.http.post(url).multipart(form)).await?;
        let bytes = response.bytes().await.map_err(AppError::from_transport)?;
        Ok(bytes.to_vec())
    }

    // ===== Diagnostics =====

    /// Probes the well-known endpoints; failures are recorded as `{"error": ...}`.
    pub async fn debug_endpoints(&self) -> BTreeMap<String, serde_json::Value> {
        let probes: [(&str, &str, bool); 7] = [
            ("Root", "/", false),
            ("Assistant POST", ASSISTANT_ENDPOINT, true),
            ("Smart Assistant POST", SMART_ASSISTANT_ENDPOINT, true),
            ("Jobs All", JOBS_ALL_ENDPOINT, false),
            ("CV Module Test", CV_TEST_ENDPOINT, false),
            ("CV Skills", CV_SKILLS_ENDPOINT, false),
            ("CV Demo", "/cv/demo", false),
        ];

        let mut results = BTreeMap::new();
        for (name, endpoint, is_post) in probes {
            let outcome = match self.url(endpoint) {
                Ok(url) => {
                    let request = if is_post {
                        self.http.post(url).query(&[("message", "test query")])
                    } else {
                        self.http.get(url)
                    };
                    self.send_json::<serde_json::Value>(request).await
                }
                Err(e) => Err(e),
            };

            let value = match outcome {
                Ok(value) => value,
                Err(AppError::Http { status, .. }) => {
                    serde_json::json!({ "error": format!("HTTP {}", status.as_u16()) })
                }
                Err(e) => serde_json::json!({ "error": e.to_string() }),
            };
            results.insert(name.to_string(), value);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_session_id_format() {
        let id = generate_session_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url("/jobs/all").unwrap().as_str(),
            "http://localhost:8000/jobs/all"
        );
    }

    #[tokio::test]
    async fn test_assistant_sends_message_as_query_param() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/assistant")
                .query_param("message", "développeur python");
            then.status(200)
                .json_body(serde_json::json!({ "jobs": [{ "job_title": "Dev Python", "match_score": 0.9 }] }));
        });

        let resp = client(&server)
            .assistant_search("développeur python")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(resp.jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_keeps_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/jobs/all");
            then.status(500).body("boom");
        });

        let err = client(&server).all_jobs().await.unwrap_err();

        match err {
            AppError::Http { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client.job_categories().await.unwrap_err();
        assert!(err.is_network());
        assert!(!client.test_connection().await);
    }

    #[test]
    fn test_category_is_one_encoded_segment() {
        let client = ApiClient::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.category_url("Data Science/IA").unwrap().as_str(),
            "http://localhost:8000/jobs/category/Data%20Science%2FIA"
        );
    }

    #[tokio::test]
    async fn test_jobs_by_category() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/jobs/category/Finance");
            then.status(200)
                .json_body(serde_json::json!([{ "job_id": 3, "job_title": "Analyste crédit" }]));
        });

        let jobs = client(&server).jobs_by_category("Finance").await.unwrap();

        mock.assert();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].job_id, Some(3));
    }

    #[tokio::test]
    async fn test_analyze_cv_text_is_form_encoded() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/cv/analyze")
                .x_www_form_urlencoded_tuple("cv_text", "Python SQL")
                .x_www_form_urlencoded_tuple("job_description", "Data analyst");
            then.status(200).json_body(serde_json::json!({ "match_score": 0.5 }));
        });

        let result = client(&server)
            .analyze_cv_text("Python SQL", "Data analyst")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(result.match_score, 0.5);
    }

    #[tokio::test]
    async fn test_ats_optimize_prefers_error_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/ats_cv");
            then.status(400)
                .json_body(serde_json::json!({ "error": "CV illisible", "detail": "parse" }));
        });

        let upload = Upload::new("cv.pdf", b"%PDF-1.4".to_vec());
        let err = client(&server).ats_optimize(&upload, None).await.unwrap_err();

        match err {
            AppError::Http { body, .. } => assert_eq!(body, "CV illisible"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_debug_endpoints_records_failures() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).json_body(serde_json::json!({ "status": "ok" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/cv/demo");
            then.status(404);
        });

        let results = client(&server).debug_endpoints().await;

        assert_eq!(results.len(), 7);
        assert_eq!(results["Root"]["status"], "ok");
        assert_eq!(results["CV Demo"]["error"], "HTTP 404");
    }
}
