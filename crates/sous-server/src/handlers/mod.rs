//! HTTP route handlers for the sous server.

pub mod recipes;
pub mod translate;

use sous_core::AgentError;
use tracing::error;

use crate::error::AppError;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Maps a delegation failure to a 500 labelled with the task.
fn task_failed(label: &str, err: AgentError) -> AppError {
    error!("{} failed: {}", label, err);
    AppError::Internal(format!("{} failed: {}", label, err))
}
