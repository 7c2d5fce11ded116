//! Error types for the session store.

use thiserror::Error;

/// Session store error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No session is registered under the identifier.
    #[error("Session not found: {0}")]
    NotFound(String),
}

/// Convenience result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
