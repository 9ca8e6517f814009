//! Prompts and response parsing shared by generation backends.

use serde_json::json;

use super::GenerationError;
use crate::models::Recipe;

/// Free-text context describing a user's dietary preferences, or `None` when
/// there are none.
pub fn dietary_context(prefs: &[String]) -> Option<String> {
    let prefs: Vec<&str> = prefs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();

    if prefs.is_empty() {
        return None;
    }

    Some(format!(
        "The user has the following dietary preferences/restrictions: {}. Please adapt the recipe to be suitable for them.",
        prefs.join(", ")
    ))
}

/// Prompt sent alongside a food photo
pub fn image_prompt(language: &str, dietary_context: Option<&str>) -> String {
    let mut prompt = format!(
        "Analyze the food in this image and generate a detailed recipe in {}. \
         The recipe should include a creative name, a short description, \
         a list of ingredients with measurements, and step-by-step instructions.",
        language
    );
    if let Some(context) = dietary_context {
        prompt.push(' ');
        prompt.push_str(context);
    }
    prompt.push_str(" Ensure the response is in JSON format.");
    prompt
}

/// Prompt asking for a modified version of `original`
pub fn remix_prompt(original: &Recipe, request: &str) -> Result<String, GenerationError> {
    let original_json = serde_json::to_string_pretty(original)
        .map_err(|e| GenerationError::InvalidInput(e.to_string()))?;

    Ok(format!(
        "Original Recipe:\n{}\n\nUser Request:\n\"{}\"\n\n\
         Based on the user's request, please modify the original recipe. Provide the complete new recipe, \
         including a potentially updated name and description.\n\
         For example, if the request is \"make it vegan\", change ingredients like \"butter\" to \"vegan butter\" \
         and \"chicken\" to \"tofu\".\n\
         Ensure the output is a single, valid JSON object that strictly follows the provided schema.",
        original_json,
        request.trim()
    ))
}

/// Response schema requested from the model
pub(crate) fn recipe_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipeName": { "type": "STRING", "description": "The name of the recipe." },
            "description": { "type": "STRING", "description": "A brief description of the dish." },
            "ingredients": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of ingredients with quantities."
            },
            "instructions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Step-by-step cooking instructions."
            }
        },
        "required": ["recipeName", "description", "ingredients", "instructions"]
    })
}

/// Parse the model's JSON text into a recipe.
///
/// Tolerates a surrounding Markdown code fence.
pub fn parse_recipe_json(text: &str) -> Result<Recipe, GenerationError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    let recipe: Recipe =
        serde_json::from_str(body).map_err(|e| GenerationError::Parse(e.to_string()))?;
    recipe.validate().map_err(GenerationError::Parse)?;
    Ok(recipe)
}
