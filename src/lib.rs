// src/lib.rs
//! Client-side orchestration layer for a remote resume analysis service.
//!
//! The remote service owns the actual intelligence (scoring, feedback,
//! recommendations, letter generation); this crate owns everything between
//! a user action and a typed result: request construction, tolerant
//! normalization of the service's loosely-typed responses, multi-step
//! workflow sequencing, and the session result cache presentation code
//! renders from.

pub mod config;
pub mod core;
pub mod error;
pub mod normalize;
pub mod orchestrator;
pub mod session;
pub mod types;
pub mod utils;

pub use crate::core::notify::{LogNotifier, NoticeLevel, Notifier, SilentNotifier};
pub use crate::core::service_client::{AnalysisTransport, RawResponse, ServiceClient};
pub use config::{PayloadEncoding, ServiceConfig, UploadStrategy};
pub use error::{ApiError, TransportError};
pub use orchestrator::AnalysisOrchestrator;
pub use session::SessionState;
pub use types::{
    AnalysisRequest, AnalysisResult, ApplicationStatus, AtsScore, ChatMessage, CoverLetter,
    DownloadArtifact, JobRecommendation, Mode, Normalized, ResumeFeedback, ResumeFile,
    TrackedApplication,
};
