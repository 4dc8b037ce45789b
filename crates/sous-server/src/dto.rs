//! Request and response bodies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub language: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RecipeSearchRequest {
    pub language: String,
    pub ingredients: String,
    pub dietary_restrictions: String,
    pub culinary: String,
}

/// Shared by the recipe-steps and drink-pairing routes.
#[derive(Debug, Deserialize)]
pub struct RecipeDetailsRequest {
    pub language: String,
    pub chosen_recipe: String,
    pub recipe_list: String,
}

/// Successful task output.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: String,
}
