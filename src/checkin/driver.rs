//! Conversation driver: one model round-trip per call.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::errors::CheckinResult;
use crate::llm::{ChatModel, CompletionParams};
use crate::session::{SessionError, SessionPhase, SessionStore, Turn};

/// Response-length cap for interview replies.
pub const CHAT_MAX_TOKENS: u32 = 500;

/// Advances sessions by sending their history to the chat model.
pub struct ConversationDriver {
    store: Arc<SessionStore>,
    model: Arc<dyn ChatModel>,
}

impl ConversationDriver {
    /// Create a driver over a store and a model.
    #[must_use]
    pub fn new(store: Arc<SessionStore>, model: Arc<dyn ChatModel>) -> Self {
        Self { store, model }
    }

    /// Create (or reset) a session and fetch the model's opening turn.
    ///
    /// A session whose opening round-trip fails is removed again.
    ///
    /// # Errors
    /// Returns an error if the model call fails.
    pub async fn open(&self, session_id: &str) -> CheckinResult<Turn> {
        self.store.create(session_id);
        let handle = self.store.handle(session_id)?;

        match self.advance(session_id).await {
            Ok(turn) => {
                info!(session_id, "check-in session started");
                Ok(turn)
            }
            Err(err) => {
                self.store.delete_handle(session_id, &handle);
                Err(err)
            }
        }
    }

    /// Send the full history and append the returned assistant turn.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown sessions, or a model error.
    pub async fn advance(&self, session_id: &str) -> CheckinResult<Turn> {
        let handle = self.store.handle(session_id)?;
        let mut session = handle.lock().await;
        if session.phase.is_terminal() {
            return Err(SessionError::NotFound(session_id.to_string()).into());
        }

        debug!(session_id, turns = session.turns.len(), "advancing conversation");
        let reply = self
            .model
            .complete(&session.turns, CompletionParams::chat(CHAT_MAX_TOKENS))
            .await
            .inspect_err(|e| warn!(session_id, "model round-trip failed: {e}"))?;

        let turn = Turn::assistant(reply);
        session.push(turn.clone());
        session.phase = SessionPhase::Active;
        Ok(turn)
    }

    /// Record a user message and fetch the model's answer.
    ///
    /// Both turns are appended only once the model has answered, so a failed
    /// round-trip leaves the session as it was. A new message invalidates any
    /// summary kept from a failed delivery.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown sessions, or a model error.
    pub async fn reply(&self, session_id: &str, message: &str) -> CheckinResult<Turn> {
        let handle = self.store.handle(session_id)?;
        let mut session = handle.lock().await;
        if !session.phase.accepts_messages() {
            return Err(SessionError::NotFound(session_id.to_string()).into());
        }

        let user_turn = Turn::user(message);
        let mut request = session.turns.clone();
        request.push(user_turn.clone());

        debug!(session_id, turns = request.len(), "advancing conversation");
        let reply = self
            .model
            .complete(&request, CompletionParams::chat(CHAT_MAX_TOKENS))
            .await
            .inspect_err(|e| warn!(session_id, "model round-trip failed: {e}"))?;

        let turn = Turn::assistant(reply);
        session.push(user_turn);
        session.push(turn.clone());
        session.phase = SessionPhase::Active;
        session.pending_summary = None;
        Ok(turn)
    }
}
