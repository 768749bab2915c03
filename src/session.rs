// src/session.rs
//! Session-scoped state: the result cache, chat transcript and tracked
//! applications

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::types::{AnalysisResult, ApplicationStatus, ChatMessage, TrackedApplication};

/// Greeting seeded into a fresh chat transcript.
pub const CHAT_GREETING: &str = "Hi there! I'm your career assistant. Ask me any questions about \
                                 your job search, resume, or interview preparation!";

/// Mutable state for one user session. Everything lives in memory and dies
/// with the session; nothing is persisted.
///
/// The result cache is a single current-value slot. `set` replaces the
/// stored value wholesale; merging of independently fetched sections is the
/// orchestrator's job, done on a copy before the slot is written.
pub struct SessionState {
    result: Mutex<Option<AnalysisResult>>,
    // Bumped per submission cycle. Only written while `result` is locked,
    // so a generation check under that lock cannot interleave with a new
    // submission.
    generation: AtomicU64,
    resume_reference: Mutex<Option<String>>,
    chat: Mutex<Vec<ChatMessage>>,
    applications: Mutex<Vec<TrackedApplication>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            result: Mutex::new(None),
            generation: AtomicU64::new(0),
            resume_reference: Mutex::new(None),
            chat: Mutex::new(vec![ChatMessage::assistant(CHAT_GREETING)]),
            applications: Mutex::new(Vec::new()),
        }
    }

    // ===== Result cache =====

    pub fn get(&self) -> Option<AnalysisResult> {
        self.result.lock().unwrap().clone()
    }

    pub fn set(&self, result: AnalysisResult) {
        *self.result.lock().unwrap() = Some(result);
    }

    pub fn clear(&self) {
        *self.result.lock().unwrap() = None;
    }

    // ===== Supersession =====

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start a new submission cycle: clears the cache and the stored resume
    /// reference, and supersedes every fetch still in flight from the
    /// previous cycle. Returns the new generation.
    pub fn begin_submission(&self) -> u64 {
        let mut slot = self.result.lock().unwrap();
        *slot = None;
        *self.resume_reference.lock().unwrap() = None;
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a cache update only if `generation` is still current.
    ///
    /// Returns false when a newer submission superseded the caller, in
    /// which case the cache is untouched and the caller's data is dropped.
    pub fn update_if_current(
        &self,
        generation: u64,
        apply: impl FnOnce(&mut AnalysisResult),
    ) -> bool {
        let mut slot = self.result.lock().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        apply(slot.get_or_insert_with(AnalysisResult::default));
        true
    }

    // ===== Uploaded resume reference =====

    pub fn set_resume_reference(&self, reference: String) {
        *self.resume_reference.lock().unwrap() = Some(reference);
    }

    pub fn resume_reference(&self) -> Option<String> {
        self.resume_reference.lock().unwrap().clone()
    }

    // ===== Chat transcript (append-only) =====

    pub fn chat_log(&self) -> Vec<ChatMessage> {
        self.chat.lock().unwrap().clone()
    }

    pub fn append_chat(&self, message: ChatMessage) -> ChatMessage {
        self.chat.lock().unwrap().push(message.clone());
        message
    }

    // ===== Application tracker =====

    pub fn track_application(&self, application: TrackedApplication) -> TrackedApplication {
        self.applications.lock().unwrap().push(application.clone());
        application
    }

    pub fn set_application_status(&self, id: &str, status: ApplicationStatus) -> bool {
        let mut applications = self.applications.lock().unwrap();
        match applications.iter_mut().find(|a| a.id == id) {
            Some(application) => {
                application.status = status;
                true
            }
            None => false,
        }
    }

    pub fn remove_application(&self, id: &str) -> bool {
        let mut applications = self.applications.lock().unwrap();
        let before = applications.len();
        applications.retain(|a| a.id != id);
        applications.len() != before
    }

    pub fn applications(&self) -> Vec<TrackedApplication> {
        self.applications.lock().unwrap().clone()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
