//! Error types for the check-in flow.

use thiserror::Error;

use super::summary::SummaryRecord;
use crate::llm::ModelError;
use crate::session::SessionError;

/// Summary generation failure.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The model request failed.
    #[error("Summary generation failed: {0}")]
    Model(#[from] ModelError),
    /// The transcript could not be rendered for the request.
    #[error("Summary generation failed: transcript encoding: {0}")]
    Transcript(serde_json::Error),
    /// The reply is not a well-formed summary record.
    #[error("Summary generation failed: malformed reply: {0}")]
    Malformed(serde_json::Error),
}

/// Webhook delivery failure, carrying the summary that was not delivered.
#[derive(Debug, Error)]
#[error("Webhook delivery failed: {message}")]
pub struct DeliveryError {
    /// Transport error or status description.
    pub message: String,
    /// HTTP status returned by the webhook, if a response arrived.
    pub status: Option<u16>,
    /// The generated summary.
    pub summary: Box<SummaryRecord>,
}

/// Any failure surfaced by the check-in service.
#[derive(Debug, Error)]
pub enum CheckinError {
    /// Unknown or already delivered session.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// Conversation round-trip failed.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Summary generation failed.
    #[error(transparent)]
    Summary(#[from] SummaryError),
    /// Webhook delivery failed.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl CheckinError {
    /// Whether the error means the session does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Session(SessionError::NotFound(_)))
    }
}

/// Convenience result alias for check-in operations.
pub type CheckinResult<T> = Result<T, CheckinError>;
