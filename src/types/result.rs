// src/types/result.rs
//! Normalized result types. Collections are empty, never null; anything the
//! backend omitted is an explicit default here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ===== Analysis sections =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    /// Match score, clamped to 0..=100.
    pub score: u8,
    pub matched_keywords: Vec<String>,
    pub missed_keywords: Vec<String>,
    /// Named reasoning sections; each section's lines keep their upstream
    /// order.
    pub reasoning_sections: Vec<ReasoningSection>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningSection {
    pub heading: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPoint {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFeedback {
    pub format_score: u8,
    pub parsing_score: u8,
    pub feedback_points: Vec<FeedbackPoint>,
    pub improvement_suggestions: Vec<String>,
}

/// Sentinel for job fields the backend did not provide. Placeholder rows
/// synthesized from plain-text listings are marked with it rather than
/// invented data.
pub const UNKNOWN_FIELD: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecommendation {
    /// Upstream id when present, otherwise a client-generated UUID.
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Clamped to 0..=100. Stays `None` when the backend omits it; the
    /// client never fabricates a plausible-looking score.
    pub match_score: Option<u8>,
    /// Free-form ("2 days ago"), not a parsed date.
    pub date_posted: String,
    pub summary: String,
    pub cover_letter_url: Option<String>,
}

impl JobRecommendation {
    /// Placeholder listing for a single line of a plain-text response.
    pub fn placeholder(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            company: UNKNOWN_FIELD.to_string(),
            location: UNKNOWN_FIELD.to_string(),
            match_score: None,
            date_posted: UNKNOWN_FIELD.to_string(),
            summary: UNKNOWN_FIELD.to_string(),
            cover_letter_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverLetter {
    pub content: String,
    pub download_url: Option<String>,
}

/// Client-side downloadable artifact, built when the server returns raw
/// cover letter content instead of a download URL.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

// ===== Chat =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

// ===== Application tracker =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedApplication {
    pub id: String,
    pub resume_name: String,
    pub role: String,
    pub company: String,
    pub status: crate::types::ApplicationStatus,
    pub date_added: DateTime<Utc>,
}

impl TrackedApplication {
    pub fn new(
        resume_name: impl Into<String>,
        role: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            resume_name: resume_name.into(),
            role: role.into(),
            company: company.into(),
            status: crate::types::ApplicationStatus::Pending,
            date_added: Utc::now(),
        }
    }
}

// ===== Aggregate result =====

/// What a single normalize call produced, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Ats(AtsScore),
    Feedback(ResumeFeedback),
    Jobs(Vec<JobRecommendation>),
    CoverLetter(CoverLetter),
    ChatReply(String),
    /// Explicit error field in an otherwise well-formed response.
    Error(String),
}

/// The current analysis for the session, as owned by the result cache.
///
/// Sections fetched independently are merged into a copy of this aggregate
/// by the orchestrator before the cache slot is replaced wholesale; the
/// cache itself never deep-merges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats: Option<AtsScore>,
    pub feedback: Option<ResumeFeedback>,
    pub jobs: Option<Vec<JobRecommendation>>,
    /// Backend-reported error, rendered as an explicit error state. This is
    /// distinct from transport failures, which leave the cache untouched.
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Fold one normalized section into the aggregate. Cover letters and
    /// chat replies are delivered to their callers directly and are not
    /// cached sections.
    pub fn merge_section(&mut self, normalized: Normalized) {
        match normalized {
            Normalized::Ats(score) => self.ats = Some(score),
            Normalized::Feedback(feedback) => self.feedback = Some(feedback),
            Normalized::Jobs(jobs) => self.jobs = Some(jobs),
            Normalized::Error(message) => self.error = Some(message),
            Normalized::CoverLetter(_) | Normalized::ChatReply(_) => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ats.is_none() && self.feedback.is_none() && self.jobs.is_none() && self.error.is_none()
    }
}
