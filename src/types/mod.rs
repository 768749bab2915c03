// src/types/mod.rs
//! Data model shared by the transport client, normalizer and orchestrator

pub mod request;
pub mod result;

pub use request::{AnalysisRequest, ApplicationStatus, Mode, ResumeFile};
pub use result::{
    AnalysisResult, AtsScore, ChatMessage, CoverLetter, DownloadArtifact, FeedbackPoint,
    JobRecommendation, Normalized, ReasoningSection, ResumeFeedback, Sender, Severity,
    TrackedApplication, UNKNOWN_FIELD,
};
