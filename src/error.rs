// src/error.rs
//! Error taxonomy for calls into the remote analysis service

use thiserror::Error;

/// Transport-level failure classes.
///
/// A 200 response whose body is not valid JSON is deliberately absent from
/// this enum; the client treats it as a success with an empty payload
/// because the backend is known to return empty bodies on some successes.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, DNS or timeout failure before any status line arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status. The message is parsed
    /// from a JSON `error` field when the body allows it, otherwise it
    /// falls back to the raw status text.
    #[error("service returned {status}: {message}")]
    Http { status: u16, message: String },
}

/// Errors surfaced by the orchestrator to presentation code.
///
/// For cached flows, a backend-reported error (an explicit `error` field in
/// a well-formed 200 response) is not an `ApiError`; it becomes an
/// error-state `AnalysisResult` that populates the cache so the UI can
/// render it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected client-side before any network call was made.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Backend-reported error on a flow whose result is delivered directly
    /// to the caller instead of the cache (cover letters).
    #[error("{0}")]
    Backend(String),
}
