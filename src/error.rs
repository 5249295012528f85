//! Custom error types and handling
//!
//! Errors here cover harness construction only: bad configuration, unknown
//! language tags, workspace setup. Failures of the programs under test are
//! never `Err`s — they surface as typed [`ExecutionResult`]s and terminal
//! phases on the message stream.
//!
//! [`ExecutionResult`]: crate::runner::ExecutionResult

/// Harness-wide error type
#[derive(Debug, thiserror::Error)]
pub enum StressError {
    #[error("Invalid timeout: {0} (must be a positive number of seconds)")]
    InvalidTimeout(f64),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to create workspace: {0}")]
    Workspace(#[source] std::io::Error),
}

/// Result type alias using StressError
pub type StressResult<T> = Result<T, StressError>;
