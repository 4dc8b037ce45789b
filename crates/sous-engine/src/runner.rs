//! Synchronous runner for one agent against a session store.

use std::sync::Arc;

use sous_core::{Agent, AgentError, AgentRuntime, Content, Event};
use tracing::debug;

use crate::session::InMemorySessionService;

/// Runs an agent turn and records it in the session.
///
/// Blocking: call from a blocking-pool thread, never from the executor.
pub struct Runner {
    agent: Agent,
    app_name: String,
    sessions: Arc<InMemorySessionService>,
    runtime: Arc<dyn AgentRuntime>,
}

impl Runner {
    /// Creates a runner whose app name is the agent name.
    pub fn new(
        agent: Agent,
        sessions: Arc<InMemorySessionService>,
        runtime: Arc<dyn AgentRuntime>,
    ) -> Self {
        let app_name = agent.name.clone();
        Self { agent, app_name, sessions, runtime }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Submits `new_message` and returns every event the runtime emitted.
    pub fn run(
        &self,
        user_id: &str,
        session_id: &str,
        new_message: Content,
    ) -> Result<Vec<Event>, AgentError> {
        self.sessions.append_event(
            &self.app_name,
            user_id,
            session_id,
            Event::new("user", Some(new_message)),
        )?;

        let session = self
            .sessions
            .get_session(&self.app_name, user_id, session_id)?
            .ok_or_else(|| AgentError::Session(format!("session {} not found", session_id)))?;

        let events = self.runtime.run(&self.agent, &session.history())?;
        debug!("{} emitted {} events", self.agent.name, events.len());

        for event in &events {
            self.sessions
                .append_event(&self.app_name, user_id, session_id, event.clone())?;
        }

        Ok(events)
    }
}
