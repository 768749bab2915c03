// src/config.rs
//! Endpoint map and transport configuration for the analysis service

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7860";
const DEFAULT_ANALYZE_PATH: &str = "/analyze";
const DEFAULT_UPLOAD_PATH: &str = "/upload_resume";
const DEFAULT_DOWNLOAD_PATH: &str = "/download";
const DEFAULT_HEALTH_PATH: &str = "/health";

const DEFAULT_TIMEOUT_SECS: u64 = 40;

/// Whether upload and analysis travel as one request or two.
///
/// Observed backend deployments have supported both; the choice is
/// configuration, not code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStrategy {
    /// POST the resume to the upload endpoint first, then fetch sections
    /// through the analyze endpoint. This is the default.
    TwoStep,
    /// Send the resume and job description on a single analyze call and
    /// read every section out of that one response.
    Combined,
}

/// Body encoding for analyze calls that carry no file.
///
/// Requests with resume bytes attached are always multipart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    Multipart,
    Json,
}

/// All endpoint URLs and encoding choices for one backend deployment.
///
/// The backend contract has changed across deployments, so nothing here is
/// hard-coded at call sites; presentation code builds one of these and
/// hands it to the client and orchestrator.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub analyze_path: String,
    pub upload_path: String,
    pub download_path: String,
    pub health_path: String,
    pub timeout: Duration,
    pub upload_strategy: UploadStrategy,
    /// Encoding for analyze calls without a file attachment, unless the
    /// request itself overrides it.
    pub default_encoding: PayloadEncoding,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            download_path: DEFAULT_DOWNLOAD_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            upload_strategy: UploadStrategy::TwoStep,
            default_encoding: PayloadEncoding::Multipart,
        }
    }

    /// Build a configuration from the environment.
    ///
    /// `ANALYSIS_API_URL` selects the deployment; the remaining settings
    /// keep their defaults and can be adjusted with the builder methods.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ANALYSIS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn with_analyze_path(mut self, path: impl Into<String>) -> Self {
        self.analyze_path = path.into();
        self
    }

    pub fn with_upload_path(mut self, path: impl Into<String>) -> Self {
        self.upload_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_upload_strategy(mut self, strategy: UploadStrategy) -> Self {
        self.upload_strategy = strategy;
        self
    }

    pub fn with_default_encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.default_encoding = encoding;
        self
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, self.analyze_path)
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, self.upload_path)
    }

    /// Absolute download URL for a server-side artifact path.
    pub fn download_url(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            self.download_path,
            path.trim_start_matches('/')
        )
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, self.health_path)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
