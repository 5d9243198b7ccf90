//! Error types for the ComplexApp client.
//!
//! This module defines the centralized error type [`AppError`] and a type alias
//! [`Result`] used throughout the crate. Errors are implemented with `thiserror`
//! so that storage, transport and decoding failures convert with `?`.

use thiserror::Error;

/// The main error type for client operations.
///
/// Cancellation is modelled as an error variant so that a cancelled request
/// can travel through the same `Result` as a completed one, but call sites are
/// expected to swallow it silently (see [`AppError::is_cancelled`]).
///
/// # Examples
///
/// ```
/// use complexapp::AppError;
///
/// let err = AppError::Cancelled;
/// assert!(err.is_cancelled());
/// assert!(!AppError::NotFound("post 1".into()).is_cancelled());
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Session store read or write failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level failure talking to the backend API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("Backend returned {status} for {path}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path that produced the status.
        path: String,
    },

    /// The request was superseded or its owner was torn down.
    ///
    /// This is an expected outcome, never something to surface to the user.
    #[error("Request cancelled")]
    Cancelled,

    /// The request completed but no entity was returned.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend answered with a payload the client did not expect.
    #[error("Unexpected response: {0}")]
    Unexpected(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

impl AppError {
    /// Returns `true` for cancellations, which callers must not report.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, AppError>;
