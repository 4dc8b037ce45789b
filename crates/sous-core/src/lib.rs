//! Core domain types and error definitions for sous.
//!
//! This crate provides the types shared across the sous workspace:
//!
//! - [`AgentError`] — Error type for agent runtime and LLM operations
//! - [`ModelConfig`] — LLM model configuration
//! - [`Agent`] and [`BuiltinTool`] — Agent definitions handed to a runtime
//! - [`Content`], [`Part`], [`Role`] — Conversation content
//! - [`Event`] — A single event emitted by an agent runtime
//! - [`AgentRuntime`] — The blocking seam to an external agent runtime
//!
//! # Example
//!
//! ```rust
//! use sous_core::{Agent, BuiltinTool, Content};
//!
//! let agent = Agent::new("search_agent", "gemini-2.0-flash")
//!     .instruction("Find recipes.")
//!     .tools([BuiltinTool::GoogleSearch]);
//!
//! assert!(agent.uses_search());
//! let msg = Content::user("Ingredients: eggs.");
//! assert_eq!(msg.text(), "Ingredients: eggs.");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while running an agent.
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM API request failed.
    #[error("LLM request failed: {0}")]
    LlmError(String),

    /// Failed to parse a provider response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Session lookup or creation failed.
    #[error("Session error: {0}")]
    Session(String),

    /// The blocking runtime task could not complete.
    #[error("Agent runtime failed: {0}")]
    Runtime(String),

    /// The provider could not be reached or the transfer broke off.
    #[error("External API error: {0}")]
    ExternalApi(String),
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::ParseError(err.to_string())
    }
}

/// Configuration for an LLM model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Unique identifier for this model configuration.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// The provider's model identifier (e.g., "gemini-2.0-flash").
    pub model: String,
    /// Optional API base URL for alternative endpoints.
    pub api_base: Option<String>,
}

// ============================================================================
// Agent definitions
// ============================================================================

/// Capabilities executed by the provider on the agent's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinTool {
    /// Grounding with Google Search.
    GoogleSearch,
}

impl BuiltinTool {
    /// Returns the wire name of the tool.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinTool::GoogleSearch => "google_search",
        }
    }
}

/// A configured agent: fixed instruction, model and optional tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub name: String,
    pub model: String,
    pub instruction: String,
    pub description: String,
    pub tools: Vec<BuiltinTool>,
}

impl Agent {
    /// Creates an agent with no instruction and no tools.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            instruction: String::new(),
            description: String::new(),
            tools: Vec::new(),
        }
    }

    /// Sets the system instruction.
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the built-in tools the agent may use.
    pub fn tools(mut self, tools: impl IntoIterator<Item = BuiltinTool>) -> Self {
        self.tools = tools.into_iter().collect();
        self
    }

    /// Returns true if the agent may call the search tool.
    pub fn uses_search(&self) -> bool {
        self.tools.contains(&BuiltinTool::GoogleSearch)
    }
}

// ============================================================================
// Content Types
// ============================================================================

/// Author role of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// A function result sent back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    #[serde(default)]
    pub response: serde_json::Value,
}

/// One part of a content block. Exactly one field is normally set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Default::default() }
    }
}

/// A block of conversation content with a role and ordered parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates a single-part user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, parts: vec![Part::text(text)] }
    }

    /// Creates a model message from parts.
    pub fn model(parts: Vec<Part>) -> Self {
        Self { role: Role::Model, parts }
    }

    /// Concatenates the text parts in order.
    pub fn text(&self) -> String {
        self.parts.iter().filter_map(|p| p.text.as_deref()).collect()
    }
}

// ============================================================================
// Events
// ============================================================================

/// An event emitted while an agent handles a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    /// Agent name, or "user" for submitted messages.
    pub author: String,
    pub content: Option<Content>,
    /// Streaming fragment that will be followed by more output.
    pub partial: bool,
}

impl Event {
    /// Creates a complete, non-partial event.
    pub fn new(author: impl Into<String>, content: Option<Content>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author: author.into(),
            content,
            partial: false,
        }
    }

    /// Returns true if this event is the agent's answer rather than an
    /// intermediate tool or streaming step.
    pub fn is_final_response(&self) -> bool {
        if self.partial {
            return false;
        }
        let Some(content) = &self.content else {
            return true;
        };
        !content
            .parts
            .iter()
            .any(|p| p.function_call.is_some() || p.function_response.is_some())
    }

    /// Returns the text parts of the event in emission order.
    pub fn text_parts(&self) -> impl Iterator<Item = &str> {
        self.content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
    }
}

/// Blocking interface to an agent runtime.
///
/// Implementations perform the full model round-trip (including any
/// provider-side tool use) and return every event produced for the turn.
/// Callers on an async executor must run this off the executor threads.
pub trait AgentRuntime: Send + Sync {
    fn run(&self, agent: &Agent, history: &[Content]) -> Result<Vec<Event>, AgentError>;
}
