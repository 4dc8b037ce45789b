//! In-memory session store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use sous_core::{AgentError, Content, Event};

/// Conversation state for one (app, user, session) triple.
#[derive(Debug, Clone)]
pub struct Session {
    pub app_name: String,
    pub user_id: String,
    pub id: String,
    pub events: Vec<Event>,
}

impl Session {
    /// Returns the content of every event, oldest first.
    pub fn history(&self) -> Vec<Content> {
        self.events.iter().filter_map(|e| e.content.clone()).collect()
    }
}

type SessionKey = (String, String, String);

/// Session store that lives only as long as the value itself.
#[derive(Debug, Default)]
pub struct InMemorySessionService {
    sessions: Mutex<HashMap<SessionKey, Session>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionKey, Session>>, AgentError> {
        self.sessions
            .lock()
            .map_err(|e| AgentError::Session(format!("session store poisoned: {}", e)))
    }

    /// Creates an empty session. Fails if the id is already taken.
    pub fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Session, AgentError> {
        let key = (app_name.to_string(), user_id.to_string(), session_id.to_string());
        let mut sessions = self.lock()?;
        if sessions.contains_key(&key) {
            return Err(AgentError::Session(format!("session {} already exists", session_id)));
        }

        let session = Session {
            app_name: key.0.clone(),
            user_id: key.1.clone(),
            id: key.2.clone(),
            events: Vec::new(),
        };
        sessions.insert(key, session.clone());
        Ok(session)
    }

    /// Returns a snapshot of a session.
    pub fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>, AgentError> {
        let key = (app_name.to_string(), user_id.to_string(), session_id.to_string());
        Ok(self.lock()?.get(&key).cloned())
    }

    /// Appends an event to an existing session.
    pub fn append_event(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
        event: Event,
    ) -> Result<(), AgentError> {
        let key = (app_name.to_string(), user_id.to_string(), session_id.to_string());
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(&key)
            .ok_or_else(|| AgentError::Session(format!("session {} not found", session_id)))?;
        session.events.push(event);
        Ok(())
    }
}
