//! The four task agents: translation, recipe search, recipe steps and drink
//! pairings.
//!
//! Each task builds an [`Agent`] from a fixed instruction, formats the user
//! message, and delegates through an [`AgentCaller`]. A blank answer is not
//! an error; the task returns a fixed apology instead.

mod prompts;

use sous_core::{Agent, AgentError, BuiltinTool, ModelConfig};
use sous_engine::AgentCaller;
use tracing::{info, warn};

use crate::prompts::*;

pub const SEARCH_APOLOGY: &str =
    "Sorry, the search agent could not find recipes for your input. Please try different ingredients or criteria.";

/// Translator: no tools.
pub fn translator_agent(model: &ModelConfig) -> Agent {
    Agent::new("translator_agent", &model.model)
        .instruction(TRANSLATOR_PROMPT)
        .description(TRANSLATOR_DESCRIPTION)
}

/// Recipe search over the given tools.
pub fn search_agent(model: &ModelConfig, tools: &[BuiltinTool]) -> Agent {
    Agent::new("search_agent", &model.model)
        .instruction(SEARCH_PROMPT)
        .description(SEARCH_DESCRIPTION)
        .tools(tools.iter().copied())
}

pub fn recipe_agent(model: &ModelConfig) -> Agent {
    Agent::new("recipe_agent", &model.model)
        .instruction(RECIPE_PROMPT)
        .description(RECIPE_DESCRIPTION)
        .tools([BuiltinTool::GoogleSearch])
}

pub fn drink_agent(model: &ModelConfig) -> Agent {
    Agent::new("drink_agent", &model.model)
        .instruction(DRINK_PROMPT)
        .description(DRINK_DESCRIPTION)
        .tools([BuiltinTool::GoogleSearch])
}

fn recipe_details_message(language: &str, chosen_recipe: &str, recipe_list: &str) -> String {
    format!("Selected language: {language}.\nChosen recipe:{chosen_recipe}.\nRecipe List: {recipe_list}")
}

/// Returns `response`, or `fallback()` when it is empty or whitespace-only.
fn or_apology(agent: &Agent, response: String, fallback: impl FnOnce() -> String) -> String {
    if response.trim().is_empty() {
        warn!("{} returned an empty response", agent.name);
        return fallback();
    }
    response
}

/// Translates `text` into `language`.
pub async fn translate_text(
    caller: &dyn AgentCaller,
    model: &ModelConfig,
    language: &str,
    text: &str,
) -> Result<String, AgentError> {
    let agent = translator_agent(model);
    let message = format!("Translate the following text into {language}: '{text}'");
    info!("Translating {} chars into {}", text.len(), language);

    let response = caller.call(&agent, &message).await?;
    Ok(or_apology(&agent, response, || {
        format!(
            "Sorry, the translation agent could not translate '{text}' to {language}. The model might have returned an empty response."
        )
    }))
}

/// Finds up to five recipes matching the constraints, using web search.
pub async fn search_recipes(
    caller: &dyn AgentCaller,
    model: &ModelConfig,
    language: &str,
    ingredients: &str,
    dietary_restrictions: &str,
    culinary: &str,
) -> Result<String, AgentError> {
    search_recipes_with_tools(
        caller,
        model,
        language,
        ingredients,
        dietary_restrictions,
        culinary,
        &[BuiltinTool::GoogleSearch],
    )
    .await
}

/// [`search_recipes`] with an explicit tool set.
pub async fn search_recipes_with_tools(
    caller: &dyn AgentCaller,
    model: &ModelConfig,
    language: &str,
    ingredients: &str,
    dietary_restrictions: &str,
    culinary: &str,
    tools: &[BuiltinTool],
) -> Result<String, AgentError> {
    let agent = search_agent(model, tools);
    let message = format!(
        "Selected Language: {language}.\nIngredients: {ingredients}.\nDietary restrictions: {dietary_restrictions}.\nCulinary: {culinary}."
    );
    info!("Searching recipes ({}, {})", culinary, language);

    let response = caller.call(&agent, &message).await?;
    Ok(or_apology(&agent, response, || SEARCH_APOLOGY.to_string()))
}

/// Returns step-by-step instructions for `chosen_recipe`.
pub async fn give_recipe(
    caller: &dyn AgentCaller,
    model: &ModelConfig,
    language: &str,
    chosen_recipe: &str,
    recipe_list: &str,
) -> Result<String, AgentError> {
    let agent = recipe_agent(model);
    let message = recipe_details_message(language, chosen_recipe, recipe_list);
    info!("Fetching recipe steps for {}", chosen_recipe);

    let response = caller.call(&agent, &message).await?;
    Ok(or_apology(&agent, response, || {
        format!(
            "Sorry, the recipe agent could not retrieve steps for '{chosen_recipe}'. It might not be found or the model returned an empty response."
        )
    }))
}

/// Suggests up to three drinks to pair with `chosen_recipe`.
pub async fn give_drink_recommendations(
    caller: &dyn AgentCaller,
    model: &ModelConfig,
    language: &str,
    chosen_recipe: &str,
    recipe_list: &str,
) -> Result<String, AgentError> {
    let agent = drink_agent(model);
    let message = recipe_details_message(language, chosen_recipe, recipe_list);
    info!("Recommending drinks for {}", chosen_recipe);

    let response = caller.call(&agent, &message).await?;
    Ok(or_apology(&agent, response, || {
        format!("Sorry, the drink agent could not find recommendations for '{chosen_recipe}'. Please try again.")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a fixed reply and records what it was asked.
    struct StubCaller {
        reply: String,
        calls: Mutex<Vec<(Agent, String)>>,
    }

    impl StubCaller {
        fn replying(reply: &str) -> Self {
            Self { reply: reply.to_string(), calls: Mutex::new(Vec::new()) }
        }

        fn only_call(&self) -> (Agent, String) {
            let calls = self.calls.lock().unwrap();
            assert_eq!(calls.len(), 1);
            calls[0].clone()
        }
    }

    #[async_trait]
    impl AgentCaller for StubCaller {
        async fn call(&self, agent: &Agent, message: &str) -> Result<String, AgentError> {
            self.calls.lock().unwrap().push((agent.clone(), message.to_string()));
            Ok(self.reply.clone())
        }
    }

    struct FailingCaller;

    #[async_trait]
    impl AgentCaller for FailingCaller {
        async fn call(&self, _agent: &Agent, _message: &str) -> Result<String, AgentError> {
            Err(AgentError::LlmError("boom".into()))
        }
    }

    fn model() -> ModelConfig {
        ModelConfig {
            id: "gemini-2.0-flash".into(),
            name: "gemini-2.0-flash".into(),
            model: "gemini-2.0-flash".into(),
            api_base: None,
        }
    }

    #[tokio::test]
    async fn translate_passes_through_and_never_searches() {
        let caller = StubCaller::replying("Bonjour");
        let out = translate_text(&caller, &model(), "French", "Hello").await.unwrap();
        assert_eq!(out, "Bonjour");

        let (agent, message) = caller.only_call();
        assert_eq!(agent.name, "translator_agent");
        assert_eq!(agent.model, "gemini-2.0-flash");
        assert!(agent.tools.is_empty());
        assert_eq!(message, "Translate the following text into French: 'Hello'");
    }

    #[tokio::test]
    async fn translate_empty_returns_apology() {
        let caller = StubCaller::replying("");
        let out = translate_text(&caller, &model(), "German", "Good night").await.unwrap();
        assert_eq!(
            out,
            "Sorry, the translation agent could not translate 'Good night' to German. The model might have returned an empty response."
        );
    }

    #[tokio::test]
    async fn translate_whitespace_only_returns_apology() {
        let caller = StubCaller::replying("  \n\t ");
        let out = translate_text(&caller, &model(), "French", "Hello").await.unwrap();
        assert_eq!(
            out,
            "Sorry, the translation agent could not translate 'Hello' to French. The model might have returned an empty response."
        );
    }

    #[tokio::test]
    async fn search_formats_message_and_enables_search() {
        let caller = StubCaller::replying("1️⃣ **Shakshuka**");
        let out = search_recipes(&caller, &model(), "English", "eggs, tomato", "vegetarian", "Middle Eastern")
            .await
            .unwrap();
        assert_eq!(out, "1️⃣ **Shakshuka**");

        let (agent, message) = caller.only_call();
        assert!(agent.uses_search());
        assert_eq!(
            message,
            "Selected Language: English.\nIngredients: eggs, tomato.\nDietary restrictions: vegetarian.\nCulinary: Middle Eastern."
        );
    }

    #[tokio::test]
    async fn search_empty_returns_apology() {
        let caller = StubCaller::replying("");
        let out = search_recipes(&caller, &model(), "English", "eggs", "none", "any").await.unwrap();
        assert_eq!(out, SEARCH_APOLOGY);
    }

    #[tokio::test]
    async fn search_with_custom_tools() {
        let caller = StubCaller::replying("list");
        search_recipes_with_tools(&caller, &model(), "English", "eggs", "none", "any", &[])
            .await
            .unwrap();
        assert!(!caller.only_call().0.uses_search());
    }

    #[tokio::test]
    async fn give_recipe_message_and_apology() {
        let caller = StubCaller::replying("");
        let out = give_recipe(&caller, &model(), "Spanish", "Paella", "1. Paella\n2. Tortilla").await.unwrap();
        assert_eq!(
            out,
            "Sorry, the recipe agent could not retrieve steps for 'Paella'. It might not be found or the model returned an empty response."
        );

        let (agent, message) = caller.only_call();
        assert_eq!(agent.name, "recipe_agent");
        assert!(agent.uses_search());
        assert_eq!(message, "Selected language: Spanish.\nChosen recipe:Paella.\nRecipe List: 1. Paella\n2. Tortilla");
    }

    #[tokio::test]
    async fn give_recipe_passes_through() {
        let caller = StubCaller::replying("1. Boil water.");
        let out = give_recipe(&caller, &model(), "English", "Pasta", "Pasta").await.unwrap();
        assert_eq!(out, "1. Boil water.");
    }

    #[tokio::test]
    async fn drinks_apology_and_search() {
        let caller = StubCaller::replying("");
        let out = give_drink_recommendations(&caller, &model(), "Italian", "Risotto", "Risotto").await.unwrap();
        assert_eq!(out, "Sorry, the drink agent could not find recommendations for 'Risotto'. Please try again.");
        let (agent, _) = caller.only_call();
        assert_eq!(agent.name, "drink_agent");
        assert!(agent.uses_search());
    }

    #[tokio::test]
    async fn drinks_pass_through() {
        let caller = StubCaller::replying("🍷 Chianti");
        let out = give_drink_recommendations(&caller, &model(), "English", "Pizza", "Pizza").await.unwrap();
        assert_eq!(out, "🍷 Chianti");
    }

    #[tokio::test]
    async fn caller_errors_propagate() {
        let err = give_recipe(&FailingCaller, &model(), "English", "Pasta", "Pasta").await.unwrap_err();
        assert_eq!(err.to_string(), "LLM request failed: boom");
    }

    #[test]
    fn only_translation_lacks_search() {
        let m = model();
        assert!(!translator_agent(&m).uses_search());
        assert!(search_agent(&m, &[BuiltinTool::GoogleSearch]).uses_search());
        assert!(recipe_agent(&m).uses_search());
        assert!(drink_agent(&m).uses_search());
    }
}
