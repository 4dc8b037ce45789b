//! Process configuration loaded from `.env` and the environment.
//!
//! The API credential is mandatory: loading fails when it is absent so the
//! server never starts without one. Everything else has a default.

use std::time::Duration;

use sous_core::ModelConfig;
use tracing::info;

/// Environment variable holding the provider credential.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Default model used by every agent.
pub const MODEL_ID: &str = "gemini-2.0-flash";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Configuration loading errors.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set. Please ensure it's in your .env file or environment.")]
    MissingCredential(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Settings shared by the whole process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: ModelConfig,
    pub bind_addr: String,
    /// Upper bound on a single upstream HTTP request.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

        let model_id = lookup("SOUS_MODEL").unwrap_or_else(|| MODEL_ID.to_string());
        let api_base = lookup("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let bind_addr = lookup("SOUS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let request_timeout = match lookup("SOUS_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid { key: "SOUS_REQUEST_TIMEOUT_SECS", value: raw })?,
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        info!("Using model {} via {}", model_id, api_base);

        Ok(Self {
            api_key,
            model: ModelConfig {
                id: model_id.clone(),
                name: model_id.clone(),
                model: model_id,
                api_base: Some(api_base),
            },
            bind_addr,
            request_timeout,
        })
    }

    /// Returns the provider base URL.
    pub fn api_base(&self) -> &str {
        self.model.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }
}
