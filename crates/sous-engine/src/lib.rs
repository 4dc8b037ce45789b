//! Agent execution for sous.
//!
//! - [`InMemorySessionService`] / [`Session`] — Per-call conversation state
//! - [`Runner`] — Drives one agent turn against a blocking [`AgentRuntime`]
//! - [`call_agent`] — Fresh session, single message, joined final text
//! - [`AgentCaller`] / [`RunnerCaller`] — Async seam used by the HTTP layer
//!
//! # Execution Model
//!
//! The runtime is blocking. [`call_agent`] moves the whole
//! create-session/run/drain sequence onto Tokio's blocking pool and awaits it,
//! so concurrent requests never stall the executor threads.
//!
//! ```rust,ignore
//! let caller = RunnerCaller::new(Arc::new(runtime));
//! let text = caller.call(&agent, "Translate the following text into French: 'Hello'").await?;
//! ```

mod runner;
mod session;

use std::sync::Arc;

use async_trait::async_trait;
use sous_core::{Agent, AgentError, AgentRuntime, Content, Event};
use tracing::info;

pub use runner::Runner;
pub use session::{InMemorySessionService, Session};

/// Placeholder identity for the single-use session.
pub const USER_ID: &str = "user1";
pub const SESSION_ID: &str = "session1";

/// Async interface for a single delegation call.
#[async_trait]
pub trait AgentCaller: Send + Sync {
    /// Sends `message` to `agent` and returns its final text, or an empty
    /// string when the agent produced none.
    async fn call(&self, agent: &Agent, message: &str) -> Result<String, AgentError>;
}

/// [`AgentCaller`] backed by a [`Runner`] over a shared runtime.
#[derive(Clone)]
pub struct RunnerCaller {
    runtime: Arc<dyn AgentRuntime>,
}

impl RunnerCaller {
    pub fn new(runtime: Arc<dyn AgentRuntime>) -> Self {
        Self { runtime }
    }
}

#[async_trait]
impl AgentCaller for RunnerCaller {
    async fn call(&self, agent: &Agent, message: &str) -> Result<String, AgentError> {
        call_agent(self.runtime.clone(), agent.clone(), message.to_string()).await
    }
}

/// Runs `agent` on `message` in a fresh session and returns the joined,
/// trimmed text of all final-response events.
pub async fn call_agent(
    runtime: Arc<dyn AgentRuntime>,
    agent: Agent,
    message: String,
) -> Result<String, AgentError> {
    info!("Calling {} ({} chars)", agent.name, message.len());

    let events = tokio::task::spawn_blocking(move || -> Result<Vec<Event>, AgentError> {
        let sessions = Arc::new(InMemorySessionService::new());
        sessions.create_session(&agent.name, USER_ID, SESSION_ID)?;
        let runner = Runner::new(agent, sessions, runtime);
        runner.run(USER_ID, SESSION_ID, Content::user(message))
    })
    .await
    .map_err(|e| AgentError::Runtime(e.to_string()))??;

    Ok(final_text(&events))
}

/// Concatenates text parts of final-response events in emission order.
pub fn final_text(events: &[Event]) -> String {
    events
        .iter()
        .filter(|e| e.is_final_response())
        .flat_map(|e| e.text_parts())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sous_core::{FunctionCall, Part};
    use std::sync::{Barrier, Mutex};

    struct ScriptedRuntime {
        events: Vec<Event>,
        seen: Mutex<Vec<(String, Vec<Content>)>>,
    }

    impl ScriptedRuntime {
        fn new(events: Vec<Event>) -> Self {
            Self { events, seen: Mutex::new(Vec::new()) }
        }
    }

    impl AgentRuntime for ScriptedRuntime {
        fn run(&self, agent: &Agent, history: &[Content]) -> Result<Vec<Event>, AgentError> {
            self.seen.lock().unwrap().push((agent.name.clone(), history.to_vec()));
            Ok(self.events.clone())
        }
    }

    struct FailingRuntime;

    impl AgentRuntime for FailingRuntime {
        fn run(&self, _agent: &Agent, _history: &[Content]) -> Result<Vec<Event>, AgentError> {
            Err(AgentError::LlmError("quota exhausted".into()))
        }
    }

    struct PanickingRuntime;

    impl AgentRuntime for PanickingRuntime {
        fn run(&self, _agent: &Agent, _history: &[Content]) -> Result<Vec<Event>, AgentError> {
            panic!("runtime crashed")
        }
    }

    /// Each run waits until another run is in flight.
    struct BarrierRuntime {
        barrier: Barrier,
    }

    impl AgentRuntime for BarrierRuntime {
        fn run(&self, agent: &Agent, _history: &[Content]) -> Result<Vec<Event>, AgentError> {
            self.barrier.wait();
            Ok(vec![Event::new(agent.name.clone(), Some(Content::model(vec![Part::text("ok")])))])
        }
    }

    fn model_event(parts: Vec<Part>) -> Event {
        Event::new("translator_agent", Some(Content::model(parts)))
    }

    #[test]
    fn final_text_joins_in_order_and_trims_outside_only() {
        let events = vec![
            model_event(vec![Part::text("\n  Bon"), Part::text("jour  ,\n\n le")]),
            model_event(vec![Part::text(" monde \n")]),
        ];
        assert_eq!(final_text(&events), "Bonjour  ,\n\n le monde");
    }

    #[test]
    fn final_text_skips_tool_and_partial_events() {
        let tool_call = model_event(vec![
            Part::text("thinking"),
            Part {
                function_call: Some(FunctionCall { name: "google_search".into(), args: json!({"q": "pasta"}) }),
                ..Default::default()
            },
        ]);
        let mut partial = model_event(vec![Part::text("Bon")]);
        partial.partial = true;
        let done = model_event(vec![Part::text("Bonjour")]);

        assert_eq!(final_text(&[tool_call, partial, done]), "Bonjour");
    }

    #[test]
    fn final_text_of_nothing_is_empty() {
        assert_eq!(final_text(&[]), "");
        assert_eq!(final_text(&[Event::new("a", None)]), "");
    }

    #[tokio::test]
    async fn call_agent_submits_single_user_message() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![model_event(vec![Part::text(" Bonjour ")])]));
        let agent = Agent::new("translator_agent", "gemini-2.0-flash");

        let text = call_agent(runtime.clone(), agent, "Translate: 'Hello'".into()).await.unwrap();

        assert_eq!(text, "Bonjour");
        let seen = runtime.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "translator_agent");
        assert_eq!(seen[0].1, vec![Content::user("Translate: 'Hello'")]);
    }

    #[tokio::test]
    async fn runner_caller_propagates_runtime_errors() {
        let caller = RunnerCaller::new(Arc::new(FailingRuntime));
        let err = caller.call(&Agent::new("search_agent", "m"), "eggs").await.unwrap_err();
        assert!(err.to_string().contains("quota exhausted"));
    }

    #[tokio::test]
    async fn panicking_runtime_becomes_runtime_error() {
        let caller = RunnerCaller::new(Arc::new(PanickingRuntime));
        let err = caller.call(&Agent::new("drink_agent", "m"), "wine").await.unwrap_err();
        assert!(matches!(err, AgentError::Runtime(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_calls_are_isolated() {
        let runtime: Arc<dyn AgentRuntime> =
            Arc::new(ScriptedRuntime::new(vec![model_event(vec![Part::text("ok")])]));
        let caller = RunnerCaller::new(runtime);

        let agent = Agent::new("recipe_agent", "m");
        let (a, b) = tokio::join!(caller.call(&agent, "one"), caller.call(&agent, "two"));
        assert_eq!(a.unwrap(), "ok");
        assert_eq!(b.unwrap(), "ok");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn blocking_runs_do_not_stall_the_executor() {
        // Both runs park on the barrier together; one executor thread cannot hold both.
        let caller = RunnerCaller::new(Arc::new(BarrierRuntime { barrier: Barrier::new(2) }));

        let agent = Agent::new("search_agent", "m");
        let (a, b) = tokio::join!(caller.call(&agent, "one"), caller.call(&agent, "two"));
        assert_eq!(a.unwrap(), "ok");
        assert_eq!(b.unwrap(), "ok");
    }
}
