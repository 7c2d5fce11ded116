//! Fixed-shape summary record and its strict parser.

use serde::{Deserialize, Serialize};

use super::errors::SummaryError;

/// Whether meetings were held with the client this week.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum MeetingsHeld {
    /// At least one meeting took place.
    Yes,
    /// No meeting took place.
    No,
}

/// Weekly check-in summary forwarded to the webhook.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryRecord {
    /// Client name.
    pub client: String,
    /// Check-in date, echoed from the summary instruction.
    pub date: String,
    /// Major activities completed this week.
    pub last_week_activities: String,
    /// Impact or outcome of those activities.
    pub impact_outcome: String,
    /// Whether meetings were held.
    pub meetings_with_client: MeetingsHeld,
    /// Meeting notes, when a meeting was held.
    #[serde(default)]
    pub meeting_summary: Option<String>,
    /// Risks, blockers or escalations.
    pub risk_blockers: String,
    /// Implementation progress, formatted like `80%`.
    pub implementation_percentage: String,
    /// Planned activities for next week.
    pub next_week_activities: String,
}

impl SummaryRecord {
    /// Parse a model reply into a record.
    ///
    /// The reply must be exactly one JSON object; only surrounding
    /// whitespace is tolerated. Unknown keys, missing keys, non-JSON quoting
    /// and trailing text are all rejected.
    ///
    /// # Errors
    /// Returns `SummaryError::Malformed` on any deviation.
    pub fn parse_reply(reply: &str) -> Result<Self, SummaryError> {
        serde_json::from_str(reply.trim()).map_err(SummaryError::Malformed)
    }
}
