// src/orchestrator.rs
//! Sequencing of multi-step analysis workflows.
//!
//! The orchestrator owns validation, the upload-then-analyze sequence,
//! lazy per-section fetches, and every write into the session cache.
//! Transport failures never touch the cache; backend-reported errors
//! populate it as an explicit error state.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::{ServiceConfig, UploadStrategy};
use crate::core::notify::{LogNotifier, NoticeLevel, Notifier};
use crate::core::service_client::{AnalysisTransport, RawResponse, ServiceClient};
use crate::error::ApiError;
use crate::normalize;
use crate::session::SessionState;
use crate::types::{
    AnalysisRequest, AnalysisResult, ApplicationStatus, ChatMessage, CoverLetter,
    DownloadArtifact, Mode, Normalized, ResumeFile, TrackedApplication,
};
use crate::utils;

pub const ALLOWED_RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

const SECTION_MODES: [Mode; 3] = [Mode::AtsScore, Mode::ResumeFeedback, Mode::JobRecommendation];

/// Fixed reply appended when a chat request fails; the user's message
/// always stays in the transcript.
pub const CHAT_FAILURE_REPLY: &str = "Sorry, I encountered an error. Please try again later.";

pub struct AnalysisOrchestrator {
    transport: Arc<dyn AnalysisTransport>,
    session: Arc<SessionState>,
    config: ServiceConfig,
    notifier: Arc<dyn Notifier>,
}

impl AnalysisOrchestrator {
    /// Orchestrator backed by a real HTTP client for `config`.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let transport = Arc::new(ServiceClient::new(config.clone())?);
        Ok(Self::with_transport(transport, config))
    }

    /// Orchestrator over any transport implementation.
    pub fn with_transport(transport: Arc<dyn AnalysisTransport>, config: ServiceConfig) -> Self {
        Self {
            transport,
            session: Arc::new(SessionState::new()),
            config,
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Shared session state for presentation code to read.
    pub fn session(&self) -> Arc<SessionState> {
        Arc::clone(&self.session)
    }

    // ===== Submission =====

    /// Validate, upload and analyze. Succeeds end to end or surfaces the
    /// first failing step's error; nothing partial reaches the cache.
    pub async fn submit_analysis(
        &self,
        resume: ResumeFile,
        job_description: &str,
        status: ApplicationStatus,
    ) -> Result<AnalysisResult, ApiError> {
        self.validate_submission(&resume, job_description)?;

        let generation = self.session.begin_submission();
        info!("Starting analysis submission, generation {}", generation);

        let analysis = match self.config.upload_strategy {
            UploadStrategy::TwoStep => {
                self.submit_two_step(resume, job_description, status).await?
            }
            UploadStrategy::Combined => {
                self.submit_combined(resume, job_description, status).await?
            }
        };

        if !self.session.update_if_current(generation, |entry| *entry = analysis.clone()) {
            info!("Discarding analysis result from a superseded submission");
        }

        match &analysis.error {
            Some(message) => self.notifier.notify(NoticeLevel::Error, message),
            None => self.notifier.notify(NoticeLevel::Success, "Analysis complete!"),
        }

        Ok(analysis)
    }

    fn validate_submission(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<(), ApiError> {
        if resume.bytes.is_empty() {
            return Err(self.validation_failure("Please upload your resume."));
        }
        if let Err(e) =
            utils::validate_file_extension(&resume.file_name, ALLOWED_RESUME_EXTENSIONS)
        {
            return Err(self.validation_failure(&format!(
                "Please upload a PDF or Word document. {e}"
            )));
        }
        if job_description.trim().is_empty() {
            return Err(self.validation_failure("Please enter a job description."));
        }
        Ok(())
    }

    fn validation_failure(&self, message: &str) -> ApiError {
        self.notifier.notify(NoticeLevel::Error, message);
        ApiError::Validation(message.to_string())
    }

    async fn submit_two_step(
        &self,
        resume: ResumeFile,
        job_description: &str,
        status: ApplicationStatus,
    ) -> Result<AnalysisResult, ApiError> {
        let ack = self
            .transport
            .upload_resume(&resume, job_description, status)
            .await?;
        if let Some(message) = normalize::backend_error(ack.json()) {
            return Ok(error_state(message));
        }
        if let Some(reference) = normalize::resume_reference(&ack) {
            self.session.set_resume_reference(reference);
        }

        let mut analysis = AnalysisResult::default();
        for kind in SECTION_MODES {
            let raw = self
                .transport
                .analyze(&AnalysisRequest::section(kind))
                .await?;
            match normalize::normalize(&raw, kind) {
                Normalized::Error(message) => return Ok(error_state(message)),
                section => analysis.merge_section(section),
            }
        }
        Ok(analysis)
    }

    async fn submit_combined(
        &self,
        resume: ResumeFile,
        job_description: &str,
        status: ApplicationStatus,
    ) -> Result<AnalysisResult, ApiError> {
        let request = AnalysisRequest::combined_analysis(resume, job_description, status);
        let raw = self.transport.analyze(&request).await?;
        if let Some(message) = normalize::backend_error(raw.json()) {
            return Ok(error_state(message));
        }

        let mut analysis = AnalysisResult::default();
        for kind in SECTION_MODES {
            // Only record sections the combined response actually carried.
            if normalize::section_present(&raw, kind) {
                analysis.merge_section(normalize::normalize(&raw, kind));
            }
        }
        Ok(analysis)
    }

    // ===== Lazy section fetches =====

    /// Fetch and normalize a single section. Independent per section: a
    /// failure here leaves every previously cached section in place.
    pub async fn fetch_section(&self, kind: Mode) -> Result<AnalysisResult, ApiError> {
        if !SECTION_MODES.contains(&kind) {
            return Err(ApiError::Validation(format!(
                "{} is not an independently fetchable section",
                kind.as_str()
            )));
        }

        let generation = self.session.generation();
        let raw = self
            .transport
            .analyze(&AnalysisRequest::section(kind))
            .await?;
        let normalized = normalize::normalize(&raw, kind);

        let applied = self
            .session
            .update_if_current(generation, |entry| entry.merge_section(normalized));
        if !applied {
            info!(
                "Discarding stale {} response from a superseded submission",
                kind.as_str()
            );
        }

        Ok(self.session.get().unwrap_or_default())
    }

    // ===== Cover letters =====

    /// Cover letter for a previously recommended job.
    pub async fn request_cover_letter(&self, job_id: &str) -> Result<CoverLetter, ApiError> {
        if job_id.trim().is_empty() {
            return Err(self.validation_failure("Missing job id."));
        }
        let raw = self
            .transport
            .analyze(&AnalysisRequest::cover_letter_for_job(job_id))
            .await?;
        self.cover_letter_from(raw)
    }

    /// Cover letter from free-form job details.
    pub async fn request_cover_letter_for(
        &self,
        job_title: &str,
        company_name: &str,
        job_description: &str,
    ) -> Result<CoverLetter, ApiError> {
        if job_title.trim().is_empty()
            || company_name.trim().is_empty()
            || job_description.trim().is_empty()
        {
            return Err(self.validation_failure("Please fill all fields"));
        }
        let raw = self
            .transport
            .analyze(&AnalysisRequest::cover_letter_details(
                job_title,
                company_name,
                job_description,
            ))
            .await?;
        self.cover_letter_from(raw)
    }

    fn cover_letter_from(&self, raw: RawResponse) -> Result<CoverLetter, ApiError> {
        match normalize::normalize(&raw, Mode::CoverLetter) {
            Normalized::Error(message) => {
                self.notifier.notify(NoticeLevel::Error, &message);
                Err(ApiError::Backend(message))
            }
            Normalized::CoverLetter(mut letter) => {
                // A bare server-side path becomes an absolute URL on the
                // configured download endpoint.
                letter.download_url = letter.download_url.map(|url| {
                    if url.starts_with("http://") || url.starts_with("https://") {
                        url
                    } else {
                        self.config.download_url(&url)
                    }
                });
                Ok(letter)
            }
            _ => Ok(CoverLetter::default()),
        }
    }

    /// Client-side downloadable artifact for a letter the server returned
    /// as raw content. `None` when a download URL exists; the UI opens that
    /// instead.
    pub fn letter_artifact(letter: &CoverLetter, label: &str) -> Option<DownloadArtifact> {
        if letter.download_url.is_some() || letter.content.is_empty() {
            return None;
        }
        Some(DownloadArtifact {
            filename: format!(
                "cover_letter_{}.txt",
                utils::sanitize_filename_component(label)
            ),
            bytes: letter.content.clone().into_bytes(),
        })
    }

    /// Fetch a server-side artifact by path.
    pub async fn download_artifact(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        Ok(self.transport.download(path).await?)
    }

    // ===== Chat =====

    /// Optimistic two-phase append: the user's message lands in the
    /// transcript before the request goes out and is never removed; a
    /// failure appends a fixed apology instead of the reply.
    pub async fn send_chat_message(&self, text: &str) -> Result<ChatMessage, ApiError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ApiError::Validation("Message is empty.".to_string()));
        }

        self.session.append_chat(ChatMessage::user(trimmed));

        let reply = match self.transport.analyze(&AnalysisRequest::chat(trimmed)).await {
            Ok(raw) => match normalize::normalize(&raw, Mode::Chatbot) {
                Normalized::ChatReply(reply) => reply,
                Normalized::Error(message) => {
                    warn!("Chat backend reported an error: {message}");
                    CHAT_FAILURE_REPLY.to_string()
                }
                _ => CHAT_FAILURE_REPLY.to_string(),
            },
            Err(e) => {
                warn!("Chat request failed: {e}");
                CHAT_FAILURE_REPLY.to_string()
            }
        };

        Ok(self.session.append_chat(ChatMessage::assistant(reply)))
    }

    // ===== Health and tracker =====

    pub async fn health_check(&self) -> bool {
        self.transport.health().await
    }

    pub fn track_application(
        &self,
        resume_name: &str,
        role: &str,
        company: &str,
    ) -> TrackedApplication {
        self.session
            .track_application(TrackedApplication::new(resume_name, role, company))
    }

    pub fn set_application_status(&self, id: &str, status: ApplicationStatus) -> bool {
        self.session.set_application_status(id, status)
    }

    pub fn remove_application(&self, id: &str) -> bool {
        self.session.remove_application(id)
    }

    pub fn applications(&self) -> Vec<TrackedApplication> {
        self.session.applications()
    }
}

fn error_state(message: String) -> AnalysisResult {
    AnalysisResult {
        error: Some(message),
        ..Default::default()
    }
}
