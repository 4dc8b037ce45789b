//! Agent runtime backed by the Gemini `generateContent` API.
//!
//! [`GeminiRuntime`] implements [`sous_core::AgentRuntime`] with a blocking
//! HTTP client. Built-in tools such as Google Search run on the provider side,
//! so one request yields the whole turn.
//!
//! ```rust,ignore
//! use sous_core::{Agent, AgentRuntime, Content};
//! use sous_llm::GeminiRuntime;
//!
//! let runtime = GeminiRuntime::new(api_key, api_base, Duration::from_secs(60))?;
//! let agent = Agent::new("translator_agent", "gemini-2.0-flash").instruction("Translate.");
//! let events = runtime.run(&agent, &[Content::user("Hello")])?;
//! ```

mod gemini;

pub use gemini::GeminiRuntime;
