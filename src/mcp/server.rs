//! SnapRecipe MCP Server Implementation
//!
//! Implements the MCP server with all SnapRecipe tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::ai::{GenerationError, ImagePayload, RecipeGenerator};
use crate::config::Config;
use crate::db::Database;
use crate::models::Recipe;
use crate::tools::generate::{self, RemixLimit};
use crate::tools::status::StatusTracker;
use crate::tools::{export, ingredients, profile, recipes, shopping_list};

/// SnapRecipe MCP Service
#[derive(Clone)]
pub struct SnapRecipeService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    /// None when no API key is configured
    generator: Option<Arc<dyn RecipeGenerator>>,
    default_language: String,
    remix_limit: RemixLimit,
    tool_router: ToolRouter<SnapRecipeService>,
}

impl SnapRecipeService {
    pub fn new(
        config: &Config,
        database: Database,
        generator: Option<Arc<dyn RecipeGenerator>>,
    ) -> Self {
        let model = generator.as_ref().map(|g| g.model_name().to_string());
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                config.database_path.clone(),
                model,
            ))),
            database,
            generator,
            default_language: config.language.clone(),
            remix_limit: RemixLimit::from_config(config),
            tool_router: Self::tool_router(),
        }
    }

    fn generator(&self) -> Result<&dyn RecipeGenerator, McpError> {
        self.generator.as_deref().ok_or_else(|| {
            let err = GenerationError::NotConfigured("GEMINI_API_KEY is not set".to_string());
            McpError::internal_error(format!("{} ({})", err.user_message(), err), None)
        })
    }

    /// Use an inline recipe or load a saved one. `Ok(None)` means the saved
    /// recipe does not exist.
    fn resolve_recipe(
        &self,
        user_id: Option<&str>,
        recipe: Option<Recipe>,
        saved_recipe_id: Option<i64>,
    ) -> Result<Option<Recipe>, McpError> {
        match (recipe, saved_recipe_id) {
            (Some(recipe), _) => Ok(Some(recipe)),
            (None, Some(id)) => {
                let user_id = user_id.ok_or_else(|| {
                    McpError::invalid_params("user_id is required with saved_recipe_id", None)
                })?;
                let saved = recipes::get(&self.database, user_id, id)
                    .map_err(|e| McpError::internal_error(e, None))?;
                Ok(saved.map(|s| s.recipe))
            }
            (None, None) => Err(McpError::invalid_params(
                "Provide either recipe or saved_recipe_id",
                None,
            )),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn not_found(what: &str, id: i64) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(format!(
        r#"{{"error": "{} not found", "id": {}}}"#,
        what, id
    ))]))
}

// ============================================================================
// Ingredient Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NormalizeIngredientsParams {
    /// Raw ingredient lines, e.g. "2 cups of flour"
    pub lines: Vec<String>,
}

// ============================================================================
// Generation Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateRecipeParams {
    pub user_id: String,
    /// Image as a data URL (data:image/jpeg;base64,...)
    pub image_data_url: Option<String>,
    /// Path to an image file, used when no data URL is given
    pub image_path: Option<String>,
    /// Output language; defaults to the server's configured language
    pub language: Option<String>,
    /// Save the generated recipe to the user's collection
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemixRecipeParams {
    pub user_id: String,
    /// Recipe to modify; alternatively give saved_recipe_id
    pub recipe: Option<Recipe>,
    pub saved_recipe_id: Option<i64>,
    /// What to change, e.g. "make it vegan"
    pub request: String,
}

// ============================================================================
// Saved Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveRecipeParams {
    pub user_id: String,
    pub recipe: Recipe,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UserParams {
    pub user_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SavedRecipeParams {
    pub user_id: String,
    pub id: i64,
}

// ============================================================================
// Shopping List Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddRecipeToShoppingListParams {
    pub user_id: String,
    pub recipe_name: String,
    /// Ingredient lines as written in the recipe
    pub ingredients: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ShoppingItemParams {
    pub user_id: String,
    /// Item text as shown on the list
    pub text: String,
    pub recipe_name: String,
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProfileParams {
    pub user_id: String,
    /// Replaces the stored list, e.g. ["Vegan", "Nut-Free"]
    pub dietary_prefs: Vec<String>,
}

// ============================================================================
// Export Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ShareRecipeParams {
    pub user_id: Option<String>,
    pub recipe: Option<Recipe>,
    pub saved_recipe_id: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportRecipePdfParams {
    pub user_id: Option<String>,
    pub recipe: Option<Recipe>,
    pub saved_recipe_id: Option<i64>,
    /// Full path of the PDF to write
    pub output_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportShoppingListPdfParams {
    pub user_id: String,
    /// Full path of the PDF to write
    pub output_path: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl SnapRecipeService {
    // --- Status ---

    #[tool(description = "Get the current status of the SnapRecipe service including build info, database status, generator configuration, and process information")]
    async fn snaprecipe_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        to_json(&status)
    }

    #[tool(description = "Get instructions for using SnapRecipe: the photo-to-recipe workflow, how ingredient lines become shopping items, and remix limits. Call this when unsure how to use the tools.")]
    fn snaprecipe_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::SNAPRECIPE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(SNAPRECIPE_INSTRUCTIONS)]))
    }

    // --- Ingredients ---

    #[tool(description = "Normalize ingredient lines into shopping-item names: strips leading quantities and one unit, drops water/ice and quantity-only lines")]
    fn normalize_ingredients(&self, Parameters(p): Parameters<NormalizeIngredientsParams>) -> Result<CallToolResult, McpError> {
        to_json(&ingredients::normalize_lines(&p.lines))
    }

    // --- Generation ---

    #[tool(description = "Generate a recipe from a food photo (data URL or file path). The user's dietary preferences are applied automatically.")]
    async fn generate_recipe(&self, Parameters(p): Parameters<GenerateRecipeParams>) -> Result<CallToolResult, McpError> {
        let generator = self.generator()?;

        let image = match (p.image_data_url.as_deref(), p.image_path.as_deref()) {
            (Some(url), _) => ImagePayload::from_data_url(url),
            (None, Some(path)) => ImagePayload::from_path(path),
            (None, None) => {
                return Err(McpError::invalid_params(
                    "Provide either image_data_url or image_path",
                    None,
                ))
            }
        }
        .map_err(|e| McpError::invalid_params(format!("{} ({})", e.user_message(), e), None))?;

        let language = p.language.as_deref().unwrap_or(&self.default_language);
        let result = generate::from_image(generator, &self.database, &p.user_id, &image, language, p.save)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Modify a recipe from a free-text request such as 'make it vegan'. Rate limited per user.")]
    async fn remix_recipe(&self, Parameters(p): Parameters<RemixRecipeParams>) -> Result<CallToolResult, McpError> {
        let generator = self.generator()?;

        let Some(recipe) = self.resolve_recipe(Some(&p.user_id), p.recipe, p.saved_recipe_id)? else {
            return not_found("Saved recipe", p.saved_recipe_id.unwrap_or_default());
        };

        let result = generate::remix(generator, &self.database, &p.user_id, &recipe, &p.request, self.remix_limit)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Saved Recipes ---

    #[tool(description = "Save a recipe to the user's collection")]
    fn save_recipe(&self, Parameters(p): Parameters<SaveRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::save(&self.database, &p.user_id, &p.recipe).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List the user's saved recipes, newest first")]
    fn list_saved_recipes(&self, Parameters(p): Parameters<UserParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::list(&self.database, &p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a saved recipe by id")]
    fn get_saved_recipe(&self, Parameters(p): Parameters<SavedRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get(&self.database, &p.user_id, p.id).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(saved) => to_json(&saved),
            None => not_found("Saved recipe", p.id),
        }
    }

    #[tool(description = "Delete a saved recipe")]
    fn delete_saved_recipe(&self, Parameters(p): Parameters<SavedRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::delete(&self.database, &p.user_id, p.id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Shopping List ---

    #[tool(description = "Add a recipe's ingredients to the user's shopping list. Each recipe is added once; lines are normalized and water/ice is skipped.")]
    fn add_recipe_to_shopping_list(&self, Parameters(p): Parameters<AddRecipeToShoppingListParams>) -> Result<CallToolResult, McpError> {
        let result = shopping_list::add_recipe(&self.database, &p.user_id, &p.recipe_name, &p.ingredients)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Add a saved recipe's ingredients to the user's shopping list")]
    fn add_saved_recipe_to_shopping_list(&self, Parameters(p): Parameters<SavedRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::add_saved_to_shopping_list(&self.database, &p.user_id, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(response) => to_json(&response),
            None => not_found("Saved recipe", p.id),
        }
    }

    #[tool(description = "Get the user's shopping list")]
    fn get_shopping_list(&self, Parameters(p): Parameters<UserParams>) -> Result<CallToolResult, McpError> {
        let result = shopping_list::get(&self.database, &p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Check or uncheck a shopping list item, identified by its text and recipe name")]
    fn toggle_shopping_item(&self, Parameters(p): Parameters<ShoppingItemParams>) -> Result<CallToolResult, McpError> {
        let result = shopping_list::toggle_item(&self.database, &p.user_id, &p.text, &p.recipe_name)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(item) => to_json(&item),
            None => to_json(&serde_json::json!({
                "error": "Shopping list item not found",
                "text": p.text,
                "recipe_name": p.recipe_name,
            })),
        }
    }

    #[tool(description = "Remove an item from the shopping list, identified by its text and recipe name")]
    fn remove_shopping_item(&self, Parameters(p): Parameters<ShoppingItemParams>) -> Result<CallToolResult, McpError> {
        let result = shopping_list::remove_item(&self.database, &p.user_id, &p.text, &p.recipe_name)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Remove every item from the user's shopping list")]
    fn clear_shopping_list(&self, Parameters(p): Parameters<UserParams>) -> Result<CallToolResult, McpError> {
        let result = shopping_list::clear(&self.database, &p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Profile ---

    #[tool(description = "Get the user's dietary preferences and the list of common options")]
    fn get_profile(&self, Parameters(p): Parameters<UserParams>) -> Result<CallToolResult, McpError> {
        let result = profile::get(&self.database, &p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Replace the user's dietary preferences (e.g. Vegan, Gluten-Free). Used as context for recipe generation.")]
    fn update_profile(&self, Parameters(p): Parameters<UpdateProfileParams>) -> Result<CallToolResult, McpError> {
        let result = profile::update(&self.database, &p.user_id, &p.dietary_prefs)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Export ---

    #[tool(description = "Format a recipe (inline or saved) as plain text for sharing")]
    fn share_recipe_text(&self, Parameters(p): Parameters<ShareRecipeParams>) -> Result<CallToolResult, McpError> {
        let Some(recipe) = self.resolve_recipe(p.user_id.as_deref(), p.recipe, p.saved_recipe_id)? else {
            return not_found("Saved recipe", p.saved_recipe_id.unwrap_or_default());
        };
        to_json(&export::ShareTextResponse {
            text: export::share_text(&recipe),
        })
    }

    #[tool(description = "Write a printable PDF of a recipe (inline or saved)")]
    fn export_recipe_pdf(&self, Parameters(p): Parameters<ExportRecipePdfParams>) -> Result<CallToolResult, McpError> {
        let Some(recipe) = self.resolve_recipe(p.user_id.as_deref(), p.recipe, p.saved_recipe_id)? else {
            return not_found("Saved recipe", p.saved_recipe_id.unwrap_or_default());
        };
        let result = export::recipe_pdf(&recipe, &p.output_path).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Write a printable PDF of the user's shopping list, grouped by recipe")]
    fn export_shopping_list_pdf(&self, Parameters(p): Parameters<ExportShoppingListPdfParams>) -> Result<CallToolResult, McpError> {
        let result = export::shopping_list_pdf(&self.database, &p.user_id, &p.output_path)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

#[tool_handler]
impl ServerHandler for SnapRecipeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "snaprecipe".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("SnapRecipe".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "SnapRecipe - food photos to recipes and shopping lists. \
                 Call snaprecipe_instructions first if unsure. \
                 Generation: generate_recipe (photo), remix_recipe (rate limited). \
                 Recipes: save_recipe, list_saved_recipes, get_saved_recipe, delete_saved_recipe. \
                 Shopping: add_recipe_to_shopping_list, add_saved_recipe_to_shopping_list, get_shopping_list, \
                 toggle_shopping_item, remove_shopping_item, clear_shopping_list. \
                 Profile: get_profile, update_profile (dietary preferences). \
                 Export: share_recipe_text, export_recipe_pdf, export_shopping_list_pdf. \
                 Utility: normalize_ingredients, snaprecipe_status."
                    .into(),
            ),
        }
    }
}
