//! Explicit lifecycle phase of a check-in session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of a session.
///
/// ```text
/// Created -> Active -> Submitted -> Delivered -> [deleted]
///                          |
///                          +-> DeliveryFailed -> Submitted (retry)
///                                      |
///                                      +-> Active (new message)
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Instruction turn stored, no model reply yet.
    #[default]
    Created,
    /// At least one model round-trip completed.
    Active,
    /// Summary generated, delivery in flight.
    Submitted,
    /// Webhook confirmed delivery. Removed from the store right after.
    Delivered,
    /// Webhook delivery failed; the generated summary is kept for a retry.
    DeliveryFailed,
}

impl SessionPhase {
    /// Stable string form for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Active => "active",
            Self::Submitted => "submitted",
            Self::Delivered => "delivered",
            Self::DeliveryFailed => "delivery_failed",
        }
    }

    /// Whether the conversation may still receive user messages.
    #[must_use]
    pub const fn accepts_messages(self) -> bool {
        matches!(self, Self::Created | Self::Active | Self::DeliveryFailed)
    }

    /// Whether the session has been handed off and must look absent.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
