//! One-shot summary generation over a finished conversation.

use std::sync::Arc;

use tracing::debug;

use super::errors::SummaryError;
use super::prompts::{current_date_string, summary_system_prompt};
use super::summary::SummaryRecord;
use crate::llm::{ChatModel, CompletionParams};
use crate::session::Turn;

/// Response-length cap for summary requests.
pub const SUMMARY_MAX_TOKENS: u32 = 1000;

/// Turns a conversation into a [`SummaryRecord`] with an independent model request.
pub struct Summarizer {
    model: Arc<dyn ChatModel>,
    date: String,
    instruction: String,
}

impl Summarizer {
    /// Create a summarizer whose instruction embeds today's date.
    ///
    /// The date is fixed at construction time.
    #[must_use]
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self::with_date(model, current_date_string())
    }

    /// Create a summarizer embedding an explicit date string.
    #[must_use]
    pub fn with_date(model: Arc<dyn ChatModel>, date: impl Into<String>) -> Self {
        let date = date.into();
        let instruction = summary_system_prompt(&date);
        Self {
            model,
            date,
            instruction,
        }
    }

    /// Date literal embedded in the instruction.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Summarize a conversation.
    ///
    /// The request holds two turns: the summary instruction and a user turn
    /// carrying the whole transcript. `turns` itself is left untouched.
    ///
    /// # Errors
    /// Returns an error if the model call fails or the reply is not a valid record.
    pub async fn summarize(&self, turns: &[Turn]) -> Result<SummaryRecord, SummaryError> {
        let transcript = render_transcript(turns)?;
        let request = [
            Turn::system(self.instruction.as_str()),
            Turn::user(transcript),
        ];

        debug!("Summarizing {} turns", turns.len());

        let reply = self
            .model
            .complete(
                &request,
                CompletionParams::chat(SUMMARY_MAX_TOKENS).with_json_output(),
            )
            .await?;

        SummaryRecord::parse_reply(&reply)
    }
}

/// Render the full turn sequence as a JSON array of `{role, content}` pairs.
fn render_transcript(turns: &[Turn]) -> Result<String, SummaryError> {
    serde_json::to_string(turns).map_err(SummaryError::Transcript)
}
