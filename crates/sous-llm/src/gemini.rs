//! Gemini REST client implementing the blocking agent runtime.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use sous_core::{Agent, AgentError, AgentRuntime, Content, Event, Part};
use tracing::{info, warn};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: &'a [Content],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Blocking runtime that sends each agent turn to Gemini.
pub struct GeminiRuntime {
    client: Client,
    api_base: String,
    api_key: String,
}

impl GeminiRuntime {
    /// Creates a runtime for the given credential and endpoint.
    pub fn new(api_key: &str, api_base: &str, timeout: Duration) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::LlmError(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

/// Builds the request body for one agent turn.
fn build_request<'a>(agent: &Agent, history: &'a [Content]) -> GenerateRequest<'a> {
    let system_instruction = (!agent.instruction.trim().is_empty()).then(|| SystemInstruction {
        parts: vec![Part::text(agent.instruction.trim())],
    });

    let tools = agent
        .tools
        .iter()
        .map(|tool| {
            let mut entry = serde_json::Map::new();
            entry.insert(tool.name().to_string(), serde_json::json!({}));
            serde_json::Value::Object(entry)
        })
        .collect();

    GenerateRequest { system_instruction, contents: history, tools }
}

/// Converts a response into runtime events, one per candidate.
fn into_events(agent: &Agent, response: GenerateResponse) -> Vec<Event> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        warn!("Gemini blocked prompt for {}: {}", agent.name, reason);
    }

    response
        .candidates
        .into_iter()
        .map(|candidate| {
            if let Some(reason) = candidate.finish_reason.as_deref().filter(|r| *r != "STOP") {
                warn!("Gemini candidate for {} finished with {}", agent.name, reason);
            }
            let content = candidate.content.map(|c| Content::model(c.parts));
            Event::new(agent.name.clone(), content)
        })
        .collect()
}

impl AgentRuntime for GeminiRuntime {
    fn run(&self, agent: &Agent, history: &[Content]) -> Result<Vec<Event>, AgentError> {
        let start = Instant::now();
        let request = build_request(agent, history);

        let response = self
            .client
            .post(self.endpoint(&agent.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .map_err(|e| AgentError::ExternalApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(AgentError::LlmError(format!("Gemini API error {}: {}", status, body)));
        }

        let body = response.text().map_err(|e| AgentError::ExternalApi(e.to_string()))?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;

        let (input_tokens, output_tokens) = parsed
            .usage_metadata
            .as_ref()
            .map(|u| (u.prompt_token_count.unwrap_or(0), u.candidates_token_count.unwrap_or(0)))
            .unwrap_or((0, 0));

        info!(
            "Gemini ({}): {}ms, tokens: {}/{} (in/out)",
            agent.name,
            start.elapsed().as_millis(),
            input_tokens,
            output_tokens
        );

        Ok(into_events(agent, parsed))
    }
}
