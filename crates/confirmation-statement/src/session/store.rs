use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::SessionData;

/// Cookie carrying the session identifier.
pub const SESSION_COOKIE_NAME: &str = "__SID";

/// Key/value session storage keyed by the session cookie value.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>, SessionError>;
    async fn save(&self, session_id: &str, data: SessionData) -> Result<(), SessionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store used by the development server and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionData>>>,
}

impl MemorySessionStore {
    pub fn with_session(session_id: impl Into<String>, data: SessionData) -> Self {
        let store = Self::default();
        if let Ok(mut guard) = store.sessions.lock() {
            guard.insert(session_id.into(), data);
        }
        store
    }

    pub fn snapshot(&self, session_id: &str) -> Option<SessionData> {
        self.sessions
            .lock()
            .ok()
            .and_then(|guard| guard.get(session_id).cloned())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>, SessionError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|_| SessionError::Unavailable("session mutex poisoned".to_string()))?;
        Ok(guard.get(session_id).cloned())
    }

    async fn save(&self, session_id: &str, data: SessionData) -> Result<(), SessionError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| SessionError::Unavailable("session mutex poisoned".to_string()))?;
        guard.insert(session_id.to_string(), data);
        Ok(())
    }
}
