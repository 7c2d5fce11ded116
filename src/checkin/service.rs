//! Check-in service orchestrating conversation, summary and delivery.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::dispatch::{DeliveryReceipt, WebhookDispatcher};
use super::driver::ConversationDriver;
use super::errors::CheckinResult;
use super::summarizer::Summarizer;
use super::summary::SummaryRecord;
use crate::llm::ChatModel;
use crate::session::{Session, SessionError, SessionPhase, SessionStore};

/// Result of a successful submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Summary that was delivered.
    pub summary: SummaryRecord,
    /// Webhook confirmation.
    pub receipt: DeliveryReceipt,
}

/// Session lifecycle entry points used by the HTTP layer.
pub struct CheckinService {
    store: Arc<SessionStore>,
    driver: ConversationDriver,
    summarizer: Summarizer,
    dispatcher: WebhookDispatcher,
}

impl CheckinService {
    /// Assemble the service from its collaborators.
    #[must_use]
    pub fn new(
        store: Arc<SessionStore>,
        model: Arc<dyn ChatModel>,
        summarizer: Summarizer,
        dispatcher: WebhookDispatcher,
    ) -> Self {
        let driver = ConversationDriver::new(Arc::clone(&store), model);
        Self {
            store,
            driver,
            summarizer,
            dispatcher,
        }
    }

    /// Underlying session store.
    #[must_use]
    pub const fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Start (or restart) a session and return the model's opening message.
    ///
    /// # Errors
    /// Returns a model error; no session is left behind in that case.
    pub async fn start(&self, session_id: &str) -> CheckinResult<String> {
        Ok(self.driver.open(session_id).await?.content)
    }

    /// Forward a user message and return the model's answer.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown sessions, or a model error.
    pub async fn message(&self, session_id: &str, message: &str) -> CheckinResult<String> {
        Ok(self.driver.reply(session_id, message).await?.content)
    }

    /// Summarize the session, deliver it, and delete the session on success.
    ///
    /// A failed delivery keeps the session in [`SessionPhase::DeliveryFailed`]
    /// together with its summary; the next submission re-delivers that summary
    /// without asking the model again.
    ///
    /// # Errors
    /// Returns `NotFound`, a summary error, or a delivery error carrying the summary.
    pub async fn submit(&self, session_id: &str) -> CheckinResult<SubmitOutcome> {
        let handle = self.store.handle(session_id)?;
        let mut session = handle.lock().await;
        if session.phase.is_terminal() {
            return Err(SessionError::NotFound(session_id.to_string()).into());
        }

        let summary = match session.pending_summary.clone() {
            Some(summary) => {
                info!(session_id, "re-delivering summary from failed attempt");
                summary
            }
            None => self
                .summarizer
                .summarize(&session.turns)
                .await
                .inspect_err(|e| warn!(session_id, "{e}"))?,
        };
        session.pending_summary = Some(summary.clone());
        let created_at = session.created_at;

        let attempt = DeliveryAttempt::begin(&mut session);
        match self.dispatcher.deliver(&summary).await {
            Ok(receipt) => {
                attempt.confirm();
                drop(session);
                self.store.delete_handle(session_id, &handle);
                let age_secs = (Utc::now() - created_at).num_seconds();
                info!(session_id, status = receipt.status, age_secs, "check-in delivered");
                Ok(SubmitOutcome { summary, receipt })
            }
            Err(err) => {
                drop(attempt);
                warn!(session_id, "{err}");
                Err(err.into())
            }
        }
    }
}

/// Holds a session in [`SessionPhase::Submitted`] while its summary is in flight.
///
/// Unless confirmed, dropping the attempt moves the session to
/// [`SessionPhase::DeliveryFailed`], which also covers a cancelled submission.
struct DeliveryAttempt<'a> {
    session: &'a mut Session,
    delivered: bool,
}

impl<'a> DeliveryAttempt<'a> {
    const fn begin(session: &'a mut Session) -> Self {
        session.phase = SessionPhase::Submitted;
        Self {
            session,
            delivered: false,
        }
    }

    fn confirm(mut self) {
        self.delivered = true;
        self.session.phase = SessionPhase::Delivered;
        self.session.pending_summary = None;
    }
}

impl Drop for DeliveryAttempt<'_> {
    fn drop(&mut self) {
        if !self.delivered {
            self.session.phase = SessionPhase::DeliveryFailed;
        }
    }
}
