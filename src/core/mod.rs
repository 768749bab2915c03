// src/core/mod.rs
//! Service plumbing shared by the orchestrator

pub mod notify;
pub mod service_client;

pub use notify::{LogNotifier, NoticeLevel, Notifier, SilentNotifier};
pub use service_client::{AnalysisTransport, RawResponse, ServiceClient};
