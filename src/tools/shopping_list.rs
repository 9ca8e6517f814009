//! Shopping List MCP Tools
//!
//! Tools for turning recipe ingredients into shopping items and managing
//! a user's list.

use serde::Serialize;

use super::ingredients::normalize_lines;
use super::require_user;
use crate::db::Database;
use crate::models::ShoppingListItem;

/// Response for add_recipe_to_shopping_list
#[derive(Debug, Serialize)]
pub struct AddRecipeResponse {
    pub recipe_name: String,
    /// True when the recipe was already on the list and nothing was written
    pub already_present: bool,
    pub added: Vec<String>,
    /// Ingredient lines that produced no shopping item
    pub omitted: Vec<String>,
    pub message: String,
}

/// Response for get_shopping_list
#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    pub items: Vec<ShoppingListItem>,
    pub total: usize,
    pub unchecked: i64,
}

/// Response for remove_shopping_item and clear_shopping_list
#[derive(Debug, Serialize)]
pub struct RemoveItemsResponse {
    pub success: bool,
    pub removed: usize,
}

/// Add a recipe's ingredients to the user's shopping list.
///
/// A recipe is added at most once per user; its ingredient lines are
/// normalized and the resulting items are appended unchecked.
pub fn add_recipe(
    db: &Database,
    user_id: &str,
    recipe_name: &str,
    ingredient_lines: &[String],
) -> Result<AddRecipeResponse, String> {
    let user_id = require_user(user_id)?;
    let recipe_name = recipe_name.trim();
    if recipe_name.is_empty() {
        return Err("Recipe name cannot be empty".to_string());
    }

    let normalized = normalize_lines(ingredient_lines);

    let mut conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let added = ShoppingListItem::add_recipe_batch(&mut conn, user_id, recipe_name, &normalized.items)
        .map_err(|e| format!("Failed to add shopping items: {}", e))?;

    let Some(count) = added else {
        tracing::warn!(user_id, recipe_name, "Recipe already on shopping list");
        return Ok(AddRecipeResponse {
            recipe_name: recipe_name.to_string(),
            already_present: true,
            added: Vec::new(),
            omitted: Vec::new(),
            message: format!("\"{}\" is already on the shopping list", recipe_name),
        });
    };

    tracing::info!(user_id, recipe_name, added = count, omitted = normalized.omitted.len(), "Added recipe to shopping list");

    Ok(AddRecipeResponse {
        recipe_name: recipe_name.to_string(),
        already_present: false,
        message: format!("Added {} items from \"{}\"", count, recipe_name),
        added: normalized.items,
        omitted: normalized.omitted,
    })
}

/// Get the user's shopping list in insertion order
pub fn get(db: &Database, user_id: &str) -> Result<ShoppingListResponse, String> {
    let user_id = require_user(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let items = ShoppingListItem::list_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to get shopping list: {}", e))?;
    let unchecked = ShoppingListItem::count_unchecked(&conn, user_id)
        .map_err(|e| format!("Failed to count items: {}", e))?;

    Ok(ShoppingListResponse {
        total: items.len(),
        items,
        unchecked,
    })
}

/// Flip the checked state of the item identified by (text, recipe_name).
///
/// Returns `None` when no such item exists.
pub fn toggle_item(
    db: &Database,
    user_id: &str,
    text: &str,
    recipe_name: &str,
) -> Result<Option<ShoppingListItem>, String> {
    let user_id = require_user(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let item = ShoppingListItem::find(&conn, user_id, text, recipe_name)
        .map_err(|e| format!("Failed to find item: {}", e))?;

    let Some(item) = item else {
        return Ok(None);
    };

    ShoppingListItem::set_checked(&conn, user_id, text, recipe_name, !item.checked)
        .map_err(|e| format!("Failed to update item: {}", e))?;

    ShoppingListItem::find(&conn, user_id, text, recipe_name)
        .map_err(|e| format!("Failed to find item: {}", e))
}

/// Remove the item identified by (text, recipe_name)
pub fn remove_item(
    db: &Database,
    user_id: &str,
    text: &str,
    recipe_name: &str,
) -> Result<RemoveItemsResponse, String> {
    let user_id = require_user(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let removed = ShoppingListItem::remove(&conn, user_id, text, recipe_name)
        .map_err(|e| format!("Failed to remove item: {}", e))?;

    Ok(RemoveItemsResponse {
        success: removed > 0,
        removed,
    })
}

/// Empty the user's shopping list
pub fn clear(db: &Database, user_id: &str) -> Result<RemoveItemsResponse, String> {
    let user_id = require_user(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let removed = ShoppingListItem::clear(&conn, user_id)
        .map_err(|e| format!("Failed to clear shopping list: {}", e))?;

    tracing::info!(user_id, removed, "Cleared shopping list");

    Ok(RemoveItemsResponse {
        success: true,
        removed,
    })
}
