// src/core/notify.rs
//! User-facing notification seam, kept out of business logic

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Toast-equivalent surface. The transport emits one notice per failed
/// request and the orchestrator adds validation and completion notices;
/// presentation code decides how to render them.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Default notifier, routes notices to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info | NoticeLevel::Success => info!("{message}"),
            NoticeLevel::Error => warn!("{message}"),
        }
    }
}

/// Drops every notice. For callers that want silent retries.
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _level: NoticeLevel, _message: &str) {}
}
