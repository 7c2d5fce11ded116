//! Error types for chat-completion calls.

use thiserror::Error;

/// Chat model error type.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Transport-level failure talking to the model service.
    #[error("OpenAI API error: {0}")]
    Http(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("OpenAI API error: status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the service.
        body: String,
    },
    /// The reply carried no assistant content.
    #[error("OpenAI API error: empty completion")]
    EmptyCompletion,
    /// Invalid client configuration.
    #[error("OpenAI API error: invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience result alias for model calls.
pub type ModelResult<T> = Result<T, ModelError>;
