// src/core/service_client.rs
//! HTTP client for the analysis service - multipart for file-bearing
//! requests, JSON for the rest

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::{PayloadEncoding, ServiceConfig};
use crate::core::notify::{LogNotifier, NoticeLevel, Notifier};
use crate::error::TransportError;
use crate::types::{AnalysisRequest, ApplicationStatus, ResumeFile};
use crate::utils;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Raw JSON payload as returned by the service, before normalization.
///
/// A 200 response with a non-JSON body becomes [`RawResponse::empty`]; the
/// backend is known to return empty bodies on some successes and that must
/// not read as a failure.
#[derive(Debug, Clone)]
pub struct RawResponse {
    value: Value,
}

impl RawResponse {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn empty() -> Self {
        Self {
            value: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn json(&self) -> &Value {
        &self.value
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Outbound calls to the analysis service. The orchestrator talks to this
/// trait only, so tests can script responses without a live backend.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// POST to the unified analyze endpoint.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<RawResponse, TransportError>;

    /// POST the resume and job description to the dedicated upload endpoint.
    async fn upload_resume(
        &self,
        resume: &ResumeFile,
        job_description: &str,
        status: ApplicationStatus,
    ) -> Result<RawResponse, TransportError>;

    /// GET a binary artifact by its server-side path.
    async fn download(&self, path: &str) -> Result<Vec<u8>, TransportError>;

    /// Liveness probe. Opportunistic, so failures are a quiet `false`.
    async fn health(&self) -> bool;
}

pub struct ServiceClient {
    client: reqwest::Client,
    config: ServiceConfig,
    notifier: Arc<dyn Notifier>,
}

impl ServiceClient {
    /// Create a new client for one backend deployment.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            notifier: Arc::new(LogNotifier),
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    fn encoding_for(&self, request: &AnalysisRequest) -> PayloadEncoding {
        if request.resume.is_some() {
            // File attachments only travel as form data.
            PayloadEncoding::Multipart
        } else {
            request.encoding.unwrap_or(self.config.default_encoding)
        }
    }

    fn multipart_form(&self, request: &AnalysisRequest) -> Result<Form, TransportError> {
        let mut form = Form::new();

        if let Some(resume) = &request.resume {
            let content_type =
                utils::content_type_for(&resume.file_name).unwrap_or(FALLBACK_CONTENT_TYPE);
            let part = Part::bytes(resume.bytes.clone())
                .file_name(resume.file_name.clone())
                .mime_str(content_type)
                .map_err(|e| {
                    TransportError::Network(format!("failed to build multipart body: {e}"))
                })?;
            form = form.part("resume_file", part);
        }

        form = form.text("mode", request.mode.as_str());
        if let Some(job_description) = &request.job_description {
            form = form.text("jd_text", job_description.clone());
        }
        if let Some(status) = request.application_status {
            form = form.text("application_status", status.as_str());
        }
        if let Some(job_id) = &request.job_id {
            form = form.text("job_id", job_id.clone());
        }
        if let Some(job_title) = &request.job_title {
            form = form.text("job_title", job_title.clone());
        }
        if let Some(company_name) = &request.company_name {
            form = form.text("company_name", company_name.clone());
        }
        if let Some(user_query) = &request.user_query {
            form = form.text("user_query", user_query.clone());
        }

        Ok(form)
    }

    fn json_body(&self, request: &AnalysisRequest) -> Value {
        let mut body = serde_json::Map::new();
        body.insert("mode".to_string(), Value::String(request.mode.as_str().to_string()));

        if let Some(job_description) = &request.job_description {
            body.insert(
                "job_description".to_string(),
                Value::String(job_description.clone()),
            );
        }
        if let Some(status) = request.application_status {
            body.insert(
                "application_status".to_string(),
                Value::String(status.as_str().to_string()),
            );
        }
        if let Some(job_id) = &request.job_id {
            body.insert("job_id".to_string(), Value::String(job_id.clone()));
        }
        if let Some(job_title) = &request.job_title {
            body.insert("job_title".to_string(), Value::String(job_title.clone()));
        }
        if let Some(company_name) = &request.company_name {
            body.insert(
                "company_name".to_string(),
                Value::String(company_name.clone()),
            );
        }
        if let Some(user_query) = &request.user_query {
            body.insert("user_query".to_string(), Value::String(user_query.clone()));
        }

        Value::Object(body)
    }

    /// Classify the response: non-2xx carries a best-effort parsed error
    /// message, a 2xx body that is not JSON is a soft success.
    async fn read_payload(
        &self,
        response: reqwest::Response,
    ) -> Result<RawResponse, TransportError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .or_else(|| body.get("message"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(TransportError::Http {
                status: status.as_u16(),
                message,
            });
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(RawResponse::new(value)),
            Err(_) => {
                warn!("Analysis service returned a non-JSON success body, treating as empty");
                Ok(RawResponse::empty())
            }
        }
    }

    fn report_failure(&self, error: &TransportError) {
        error!("Analysis service call failed: {error}");
        self.notifier.notify(NoticeLevel::Error, &error.to_string());
    }

    async fn do_analyze(&self, request: &AnalysisRequest) -> Result<RawResponse, TransportError> {
        let url = self.config.analyze_url();
        info!("Calling analysis service: {} mode={}", url, request.mode.as_str());

        let builder = match self.encoding_for(request) {
            PayloadEncoding::Multipart => self
                .client
                .post(&url)
                .multipart(self.multipart_form(request)?),
            PayloadEncoding::Json => self.client.post(&url).json(&self.json_body(request)),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        self.read_payload(response).await
    }

    async fn do_upload(
        &self,
        resume: &ResumeFile,
        job_description: &str,
        status: ApplicationStatus,
    ) -> Result<RawResponse, TransportError> {
        let url = self.config.upload_url();
        info!("Uploading resume to: {}", url);

        let content_type =
            utils::content_type_for(&resume.file_name).unwrap_or(FALLBACK_CONTENT_TYPE);
        let part = Part::bytes(resume.bytes.clone())
            .file_name(resume.file_name.clone())
            .mime_str(content_type)
            .map_err(|e| TransportError::Network(format!("failed to build multipart body: {e}")))?;

        let form = Form::new()
            .part("resume_file", part)
            .text("jd_text", job_description.to_string())
            .text("application_status", status.as_str());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        self.read_payload(response).await
    }

    async fn do_download(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        let url = self.config.download_url(path);
        info!("Downloading artifact: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("download failed")
                    .to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AnalysisTransport for ServiceClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<RawResponse, TransportError> {
        let result = self.do_analyze(request).await;
        if let Err(error) = &result {
            self.report_failure(error);
        }
        result
    }

    async fn upload_resume(
        &self,
        resume: &ResumeFile,
        job_description: &str,
        status: ApplicationStatus,
    ) -> Result<RawResponse, TransportError> {
        let result = self.do_upload(resume, job_description, status).await;
        if let Err(error) = &result {
            self.report_failure(error);
        }
        result
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        let result = self.do_download(path).await;
        if let Err(error) = &result {
            self.report_failure(error);
        }
        result
    }

    async fn health(&self) -> bool {
        match self.client.get(self.config.health_url()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Health check failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadStrategy;
    use serde_json::json;

    fn client(config: ServiceConfig) -> ServiceClient {
        ServiceClient::new(config).expect("client should build")
    }

    #[test]
    fn test_encoding_prefers_multipart_for_files() {
        let client = client(ServiceConfig::new("http://localhost:1"));
        let request = AnalysisRequest::combined_analysis(
            ResumeFile::new("resume.pdf", vec![1, 2, 3]),
            "jd",
            ApplicationStatus::Pending,
        );
        assert_eq!(client.encoding_for(&request), PayloadEncoding::Multipart);
    }

    #[test]
    fn test_encoding_respects_request_override() {
        let client = client(
            ServiceConfig::new("http://localhost:1").with_upload_strategy(UploadStrategy::TwoStep),
        );
        let details = AnalysisRequest::cover_letter_details("Dev", "Acme", "jd");
        assert_eq!(client.encoding_for(&details), PayloadEncoding::Json);

        let section = AnalysisRequest::section(crate::types::Mode::AtsScore);
        assert_eq!(client.encoding_for(&section), PayloadEncoding::Multipart);
    }

    #[test]
    fn test_json_body_carries_only_present_fields() {
        let client = client(ServiceConfig::new("http://localhost:1"));
        let request = AnalysisRequest::cover_letter_details("Dev", "Acme", "Build things");
        let body = client.json_body(&request);

        assert_eq!(body["mode"], json!("cover_letter"));
        assert_eq!(body["job_title"], json!("Dev"));
        assert_eq!(body["company_name"], json!("Acme"));
        assert_eq!(body["job_description"], json!("Build things"));
        assert!(body.get("user_query").is_none());
        assert!(body.get("job_id").is_none());
    }

    #[test]
    fn test_raw_response_empty_is_an_object() {
        let raw = RawResponse::empty();
        assert!(raw.json().is_object());
        assert_eq!(raw.json().as_object().map(|o| o.len()), Some(0));
    }
}
