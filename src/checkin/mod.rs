//! Weekly check-in flow.
//!
//! - `prompts`: instruction templates for the interview and the summary
//! - `driver`: conversation round-trips against the chat model
//! - `summary` / `summarizer`: the fixed-shape record and its generation
//! - `dispatch`: webhook delivery
//! - `service`: session lifecycle tying the pieces together

pub mod dispatch;
pub mod driver;
pub mod errors;
pub mod prompts;
pub mod service;
pub mod summarizer;
pub mod summary;

pub use dispatch::{DEFAULT_WEBHOOK_URL, DeliveryReceipt, WEBHOOK_TIMEOUT, WebhookDispatcher};
pub use driver::{CHAT_MAX_TOKENS, ConversationDriver};
pub use errors::{CheckinError, CheckinResult, DeliveryError, SummaryError};
pub use prompts::{CHAT_SYSTEM_PROMPT, current_date_string, summary_system_prompt};
pub use service::{CheckinService, SubmitOutcome};
pub use summarizer::{SUMMARY_MAX_TOKENS, Summarizer};
pub use summary::{MeetingsHeld, SummaryRecord};
