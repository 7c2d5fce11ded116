//! Session subsystem: turns, lifecycle phases, and the in-memory store.

pub mod errors;
pub mod phase;
pub mod store;
pub mod turn;

pub use errors::{SessionError, SessionResult};
pub use phase::SessionPhase;
pub use store::{Session, SessionHandle, SessionStore};
pub use turn::{Role, Turn};
