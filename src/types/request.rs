// src/types/request.rs
use serde::{Deserialize, Serialize};

use crate::config::PayloadEncoding;

/// Discriminator selecting which analysis operation a request performs.
///
/// Wire values match the backend's `mode` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Upload,
    AtsScore,
    ResumeFeedback,
    JobRecommendation,
    CoverLetter,
    Chatbot,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Upload => "upload",
            Mode::AtsScore => "ats_score",
            Mode::ResumeFeedback => "resume_feedback",
            Mode::JobRecommendation => "job_recommendation",
            Mode::CoverLetter => "cover_letter",
            Mode::Chatbot => "chatbot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// A resume attachment as picked by the user.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// One outbound request to the analysis service.
///
/// Exactly one mode per request; fields outside that mode's requirement are
/// ignored by the backend contract. Constructed per user action, sent, and
/// discarded after response handling.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub mode: Mode,
    pub resume: Option<ResumeFile>,
    pub job_description: Option<String>,
    pub application_status: Option<ApplicationStatus>,
    pub job_id: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub user_query: Option<String>,
    /// Per-request encoding override; `None` falls back to the configured
    /// default. Requests with resume bytes are always multipart.
    pub encoding: Option<PayloadEncoding>,
}

impl AnalysisRequest {
    fn bare(mode: Mode) -> Self {
        Self {
            mode,
            resume: None,
            job_description: None,
            application_status: None,
            job_id: None,
            job_title: None,
            company_name: None,
            user_query: None,
            encoding: None,
        }
    }

    /// A section fetch (ATS score, feedback or recommendations).
    pub fn section(mode: Mode) -> Self {
        Self::bare(mode)
    }

    /// A combined upload-and-analyze request carrying the resume file.
    pub fn combined_analysis(
        resume: ResumeFile,
        job_description: impl Into<String>,
        status: ApplicationStatus,
    ) -> Self {
        Self {
            resume: Some(resume),
            job_description: Some(job_description.into()),
            application_status: Some(status),
            ..Self::bare(Mode::AtsScore)
        }
    }

    /// Cover letter for a previously recommended job.
    pub fn cover_letter_for_job(job_id: impl Into<String>) -> Self {
        Self {
            job_id: Some(job_id.into()),
            ..Self::bare(Mode::CoverLetter)
        }
    }

    /// Cover letter from free-form job details. The backend expects this
    /// variant as JSON rather than form data.
    pub fn cover_letter_details(
        job_title: impl Into<String>,
        company_name: impl Into<String>,
        job_description: impl Into<String>,
    ) -> Self {
        Self {
            job_title: Some(job_title.into()),
            company_name: Some(company_name.into()),
            job_description: Some(job_description.into()),
            encoding: Some(PayloadEncoding::Json),
            ..Self::bare(Mode::CoverLetter)
        }
    }

    pub fn chat(query: impl Into<String>) -> Self {
        Self {
            user_query: Some(query.into()),
            ..Self::bare(Mode::Chatbot)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wire_values() {
        assert_eq!(Mode::AtsScore.as_str(), "ats_score");
        assert_eq!(
            serde_json::to_value(Mode::JobRecommendation).unwrap(),
            serde_json::json!("job_recommendation")
        );
    }

    #[test]
    fn test_cover_letter_details_prefers_json() {
        let request = AnalysisRequest::cover_letter_details("Dev", "Acme", "Build things");
        assert_eq!(request.mode, Mode::CoverLetter);
        assert_eq!(request.encoding, Some(PayloadEncoding::Json));
        assert!(request.resume.is_none());
    }
}
