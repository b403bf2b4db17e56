//! Session manager
//!
//! The session id is an opaque string the remote agent uses to key its
//! conversation memory. It changes only on reset, and reset replaces it
//! wholesale. Reads vastly outnumber writes, so the id sits behind an
//! `RwLock`.

use std::sync::RwLock;
use uuid::Uuid;

pub struct SessionManager {
    id: RwLock<String>,
}

impl SessionManager {
    /// Start with a fresh session id.
    pub fn new() -> Self {
        Self {
            id: RwLock::new(Self::fresh_id()),
        }
    }

    /// The current session id.
    pub fn current(&self) -> String {
        self.id
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the session id and return the new one. The remote agent
    /// sees the next turn as the start of a new conversation.
    pub fn reset(&self) -> String {
        let new_id = Self::fresh_id();
        let mut guard = self
            .id
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        tracing::info!(old = %*guard, new = %new_id, "session reset");
        *guard = new_id.clone();
        new_id
    }

    fn fresh_id() -> String {
        Uuid::new_v4().to_string()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
