//! In-memory session store keyed by caller-chosen identifiers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::checkin::prompts::CHAT_SYSTEM_PROMPT;
use crate::checkin::summary::SummaryRecord;
use crate::session::errors::{SessionError, SessionResult};
use crate::session::phase::SessionPhase;
use crate::session::turn::{Role, Turn};

/// A single check-in conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Caller-supplied identifier.
    pub id: String,
    /// Ordered turns; the first one is always the instruction turn.
    pub turns: Vec<Turn>,
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Summary kept after a failed delivery so a retry does not regenerate it.
    pub pending_summary: Option<SummaryRecord>,
}

impl Session {
    fn new(id: &str, instruction: &str) -> Self {
        Self {
            id: id.to_string(),
            turns: vec![Turn::system(instruction)],
            phase: SessionPhase::Created,
            created_at: Utc::now(),
            pending_summary: None,
        }
    }

    /// Append a turn in order.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Number of turns carrying the given role.
    #[must_use]
    pub fn count_role(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }
}

/// Exclusive handle on one session entry.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Process-wide session map with one exclusive lock per entry.
///
/// Operations addressed to the same identifier are serialized through that
/// entry's lock; distinct identifiers never contend.
pub struct SessionStore {
    instruction: Arc<str>,
    sessions: DashMap<String, SessionHandle>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create an empty store seeding sessions with the check-in instruction.
    #[must_use]
    pub fn new() -> Self {
        Self::with_instruction(CHAT_SYSTEM_PROMPT)
    }

    /// Create an empty store seeding sessions with a custom instruction.
    #[must_use]
    pub fn with_instruction(instruction: impl Into<Arc<str>>) -> Self {
        Self {
            instruction: instruction.into(),
            sessions: DashMap::new(),
        }
    }

    /// Create (or silently overwrite) a session holding only the instruction turn.
    pub fn create(&self, id: &str) -> Session {
        let session = Session::new(id, &self.instruction);
        let replaced = self
            .sessions
            .insert(id.to_string(), Arc::new(Mutex::new(session.clone())))
            .is_some();
        debug!(session_id = id, replaced, "session created");
        session
    }

    /// Exclusive handle on a session.
    ///
    /// # Errors
    /// Returns `NotFound` if no session is registered under `id`.
    pub fn handle(&self, id: &str) -> SessionResult<SessionHandle> {
        self.sessions
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Append a turn to a session.
    ///
    /// # Errors
    /// Returns `NotFound` if the session is absent or already delivered.
    pub async fn append(
        &self,
        id: &str,
        role: Role,
        content: impl Into<String>,
    ) -> SessionResult<()> {
        let handle = self.handle(id)?;
        let mut session = handle.lock().await;
        if session.phase.is_terminal() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        session.push(Turn::new(role, content));
        Ok(())
    }

    /// Ordered turns of a session.
    ///
    /// # Errors
    /// Returns `NotFound` if the session is absent or already delivered.
    pub async fn get(&self, id: &str) -> SessionResult<Vec<Turn>> {
        Ok(self.snapshot(id).await?.turns)
    }

    /// Current phase of a session.
    ///
    /// # Errors
    /// Returns `NotFound` if the session is absent or already delivered.
    pub async fn phase(&self, id: &str) -> SessionResult<SessionPhase> {
        Ok(self.snapshot(id).await?.phase)
    }

    /// Full copy of a session.
    ///
    /// # Errors
    /// Returns `NotFound` if the session is absent or already delivered.
    pub async fn snapshot(&self, id: &str) -> SessionResult<Session> {
        let handle = self.handle(id)?;
        let session = handle.lock().await;
        if session.phase.is_terminal() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(session.clone())
    }

    /// Remove a session. Removing an absent id is a no-op.
    pub fn delete(&self, id: &str) {
        if self.sessions.remove(id).is_some() {
            debug!(session_id = id, "session deleted");
        }
    }

    /// Remove a session only if `id` still maps to `handle`.
    ///
    /// Protects a session re-created under the same id while the old one was
    /// being delivered.
    pub fn delete_handle(&self, id: &str, handle: &SessionHandle) -> bool {
        let removed = self
            .sessions
            .remove_if(id, |_, current| Arc::ptr_eq(current, handle))
            .is_some();
        if removed {
            debug!(session_id = id, "session deleted");
        }
        removed
    }

    /// Whether a session is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
