//! Translation handler.

use std::sync::Arc;

use axum::{extract::State, Json};

use super::task_failed;
use crate::dto::{ResultResponse, TranslateRequest};
use crate::error::AppError;
use crate::ServerState;

/// Translates text using the translator agent.
pub async fn translate(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    let result = sous_agents::translate_text(state.caller.as_ref(), &state.model, &req.language, &req.text)
        .await
        .map_err(|e| task_failed("Translation", e))?;
    Ok(Json(ResultResponse { result }))
}
