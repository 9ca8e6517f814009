//! Saved Recipe MCP Tools
//!
//! Tools for saving generated recipes and reusing them later.

use serde::Serialize;

use super::require_user;
use super::shopping_list::{self, AddRecipeResponse};
use crate::db::Database;
use crate::models::{Recipe, SavedRecipe};

/// Saved recipe summary for listing
#[derive(Debug, Serialize)]
pub struct SavedRecipeSummary {
    pub id: i64,
    pub recipe_name: String,
    pub description: String,
    pub ingredient_count: usize,
    pub created_at: String,
}

/// Response for list_saved_recipes
#[derive(Debug, Serialize)]
pub struct ListSavedRecipesResponse {
    pub recipes: Vec<SavedRecipeSummary>,
    pub count: usize,
}

/// Response for delete_saved_recipe
#[derive(Debug, Serialize)]
pub struct DeleteRecipeResponse {
    pub success: bool,
    pub deleted_id: i64,
}

/// Save a recipe for a user
pub fn save(db: &Database, user_id: &str, recipe: &Recipe) -> Result<SavedRecipe, String> {
    let user_id = require_user(user_id)?;
    recipe.validate()?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let saved = SavedRecipe::create(&conn, user_id, recipe)
        .map_err(|e| format!("Failed to save recipe: {}", e))?;

    tracing::info!(user_id, id = saved.id, recipe = %recipe.recipe_name, "Saved recipe");
    Ok(saved)
}

/// List a user's saved recipes, newest first
pub fn list(db: &Database, user_id: &str) -> Result<ListSavedRecipesResponse, String> {
    let user_id = require_user(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let saved = SavedRecipe::list_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to list recipes: {}", e))?;

    let recipes: Vec<SavedRecipeSummary> = saved
        .into_iter()
        .map(|s| SavedRecipeSummary {
            id: s.id,
            ingredient_count: s.recipe.ingredients.len(),
            recipe_name: s.recipe.recipe_name,
            description: s.recipe.description,
            created_at: s.created_at,
        })
        .collect();

    Ok(ListSavedRecipesResponse {
        count: recipes.len(),
        recipes,
    })
}

/// Get one saved recipe
pub fn get(db: &Database, user_id: &str, id: i64) -> Result<Option<SavedRecipe>, String> {
    let user_id = require_user(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    SavedRecipe::get_by_id(&conn, user_id, id).map_err(|e| format!("Failed to get recipe: {}", e))
}

/// Delete a saved recipe
pub fn delete(db: &Database, user_id: &str, id: i64) -> Result<DeleteRecipeResponse, String> {
    let user_id = require_user(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = SavedRecipe::delete(&conn, user_id, id)
        .map_err(|e| format!("Failed to delete recipe: {}", e))?;

    if deleted {
        tracing::info!(user_id, id, "Deleted saved recipe");
    }

    Ok(DeleteRecipeResponse {
        success: deleted,
        deleted_id: id,
    })
}

/// Add a saved recipe's ingredients to the shopping list.
///
/// Returns `None` when the recipe does not exist.
pub fn add_saved_to_shopping_list(
    db: &Database,
    user_id: &str,
    id: i64,
) -> Result<Option<AddRecipeResponse>, String> {
    let Some(saved) = get(db, user_id, id)? else {
        return Ok(None);
    };

    shopping_list::add_recipe(
        db,
        user_id,
        &saved.recipe.recipe_name,
        &saved.recipe.ingredients,
    )
    .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_recipe;

    #[test]
    fn test_save_list_get_delete() {
        let db = Database::in_memory().unwrap();
        let first = save(&db, "alice", &sample_recipe("Focaccia")).unwrap();
        let second = save(&db, "alice", &sample_recipe("Risotto")).unwrap();
        save(&db, "bob", &sample_recipe("Ramen")).unwrap();

        let listed = list(&db, "alice").unwrap();
        assert_eq!(listed.count, 2);
        assert_eq!(listed.recipes[0].id, second.id);
        assert_eq!(listed.recipes[1].recipe_name, "Focaccia");
        assert_eq!(listed.recipes[1].ingredient_count, 4);

        let fetched = get(&db, "alice", first.id).unwrap().unwrap();
        assert_eq!(fetched.recipe, sample_recipe("Focaccia"));
        assert!(get(&db, "bob", first.id).unwrap().is_none());

        assert!(!delete(&db, "bob", first.id).unwrap().success);
        assert!(delete(&db, "alice", first.id).unwrap().success);
        assert!(get(&db, "alice", first.id).unwrap().is_none());
    }

    #[test]
    fn test_save_rejects_invalid_recipe() {
        let db = Database::in_memory().unwrap();
        let mut recipe = sample_recipe("Focaccia");
        recipe.ingredients.clear();
        assert!(save(&db, "alice", &recipe).is_err());
    }

    #[test]
    fn test_add_saved_to_shopping_list() {
        let db = Database::in_memory().unwrap();
        let saved = save(&db, "alice", &sample_recipe("Focaccia")).unwrap();

        let response = add_saved_to_shopping_list(&db, "alice", saved.id).unwrap().unwrap();
        assert_eq!(response.added, vec!["flour", "garlic, minced", "Salt to taste"]);
        assert_eq!(response.omitted, vec!["1 cup water"]);

        let again = add_saved_to_shopping_list(&db, "alice", saved.id).unwrap().unwrap();
        assert!(again.already_present);

        assert!(add_saved_to_shopping_list(&db, "alice", 9999).unwrap().is_none());
    }
}
