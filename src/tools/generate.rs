//! Recipe generation tools
//!
//! Glue between the recipe generator, the user's profile and the
//! generation log.

use rusqlite::TransactionBehavior;
use serde::Serialize;

use super::require_user;
use crate::ai::{dietary_context, GenerationError, ImagePayload, RecipeGenerator};
use crate::config::Config;
use crate::db::Database;
use crate::models::{GenerationLog, Profile, Recipe, SavedRecipe};

const REMIX_FUNCTION: &str = "remix-recipe";

/// Per-user remix allowance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemixLimit {
    pub max_requests: i64,
    pub window_secs: u64,
}

impl RemixLimit {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_requests: config.remix_limit,
            window_secs: config.remix_window_secs,
        }
    }
}

/// Response for generate_recipe
#[derive(Debug, Serialize)]
pub struct GenerateRecipeResponse {
    pub recipe: Recipe,
    /// Id of the saved copy when saving was requested
    pub saved_id: Option<i64>,
    pub dietary_prefs_applied: Vec<String>,
    pub model: String,
}

/// Response for remix_recipe
#[derive(Debug, Serialize)]
pub struct RemixRecipeResponse {
    pub recipe: Recipe,
    /// Remixes left in the current window
    pub remaining: i64,
    pub model: String,
}

/// Log a generation failure and turn it into a tool error message
fn generation_failed(err: GenerationError) -> String {
    tracing::error!(error = %err, retryable = err.is_retryable(), "Recipe generation failed");
    format!("{} ({})", err.user_message(), err)
}

/// Generate a recipe from a photo, adapted to the user's dietary preferences
pub async fn from_image(
    generator: &dyn RecipeGenerator,
    db: &Database,
    user_id: &str,
    image: &ImagePayload,
    language: &str,
    save: bool,
) -> Result<GenerateRecipeResponse, String> {
    let user_id = require_user(user_id)?;
    let language = language.trim();
    if language.is_empty() {
        return Err("Language cannot be empty".to_string());
    }

    let prefs = db
        .with_conn(|conn| {
            Ok(Profile::get(conn, user_id)?
                .map(|p| p.dietary_prefs)
                .unwrap_or_default())
        })
        .map_err(|e| format!("Database error: {}", e))?;

    let context = dietary_context(&prefs);
    let recipe = generator
        .generate_from_image(image, language, context.as_deref())
        .await
        .map_err(generation_failed)?;

    let saved_id = if save {
        let saved = db
            .with_conn(|conn| SavedRecipe::create(conn, user_id, &recipe))
            .map_err(|e| format!("Failed to save recipe: {}", e))?;
        Some(saved.id)
    } else {
        None
    };

    tracing::info!(user_id, recipe = %recipe.recipe_name, ?saved_id, "Generated recipe");

    Ok(GenerateRecipeResponse {
        recipe,
        saved_id,
        dietary_prefs_applied: prefs,
        model: generator.model_name().to_string(),
    })
}

/// Rework a recipe from a free-text request, subject to the user's remix limit
pub async fn remix(
    generator: &dyn RecipeGenerator,
    db: &Database,
    user_id: &str,
    recipe: &Recipe,
    request: &str,
    limit: RemixLimit,
) -> Result<RemixRecipeResponse, String> {
    let user_id = require_user(user_id)?;
    let request = request.trim();
    if request.is_empty() {
        return Err("Remix request cannot be empty".to_string());
    }
    recipe.validate()?;

    let used = db
        .with_conn_mut(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            GenerationLog::prune_older_than(&tx, limit.window_secs)?;
            let used = GenerationLog::count_since(&tx, user_id, REMIX_FUNCTION, limit.window_secs)?;
            if used < limit.max_requests {
                GenerationLog::record(&tx, user_id, REMIX_FUNCTION)?;
            }
            tx.commit()?;
            Ok(used)
        })
        .map_err(|e| format!("Database error: {}", e))?;

    if used >= limit.max_requests {
        tracing::warn!(user_id, used, max = limit.max_requests, "Remix rate limit exceeded");
        return Err(format!(
            "Rate limit exceeded: at most {} remixes per {} seconds. Please try again later.",
            limit.max_requests, limit.window_secs
        ));
    }

    let remixed = generator
        .remix(recipe, request)
        .await
        .map_err(generation_failed)?;

    tracing::info!(user_id, from = %recipe.recipe_name, to = %remixed.recipe_name, "Remixed recipe");

    Ok(RemixRecipeResponse {
        recipe: remixed,
        remaining: limit.max_requests - used - 1,
        model: generator.model_name().to_string(),
    })
}
