//! Recipe search, recipe steps and drink pairing handlers.

use std::sync::Arc;

use axum::{extract::State, Json};

use super::task_failed;
use crate::dto::{RecipeDetailsRequest, RecipeSearchRequest, ResultResponse};
use crate::error::AppError;
use crate::ServerState;

/// Searches for recipes using the search agent.
pub async fn search(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<RecipeSearchRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    let result = sous_agents::search_recipes(
        state.caller.as_ref(),
        &state.model,
        &req.language,
        &req.ingredients,
        &req.dietary_restrictions,
        &req.culinary,
    )
    .await
    .map_err(|e| task_failed("Recipe search", e))?;
    Ok(Json(ResultResponse { result }))
}

/// Returns full steps for the chosen recipe.
pub async fn give_recipe(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<RecipeDetailsRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    let result = sous_agents::give_recipe(
        state.caller.as_ref(),
        &state.model,
        &req.language,
        &req.chosen_recipe,
        &req.recipe_list,
    )
    .await
    .map_err(|e| task_failed("Fetching recipe details", e))?;
    Ok(Json(ResultResponse { result }))
}

/// Recommends drinks for the chosen recipe.
pub async fn drinks(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<RecipeDetailsRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    let result = sous_agents::give_drink_recommendations(
        state.caller.as_ref(),
        &state.model,
        &req.language,
        &req.chosen_recipe,
        &req.recipe_list,
    )
    .await
    .map_err(|e| task_failed("Drink recommendation", e))?;
    Ok(Json(ResultResponse { result }))
}
