//! Recipe models
//!
//! `Recipe` is the document produced by the recipe generator; `SavedRecipe`
//! is a recipe a user chose to keep.

use rmcp::schemars;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// Approximate nutrition per serving, as free text ("350 kcal", "12g")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RecipeNutrition {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

/// A generated recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Display name of the dish
    pub recipe_name: String,
    pub description: String,
    /// Ingredient lines with quantities, e.g. "1 1/2 cups flour"
    pub ingredients: Vec<String>,
    /// Ordered cooking steps
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<RecipeNutrition>,
}

impl Recipe {
    /// Check the fields a usable recipe must have
    pub fn validate(&self) -> Result<(), String> {
        if self.recipe_name.trim().is_empty() {
            return Err("Recipe name cannot be empty".to_string());
        }
        if self.ingredients.is_empty() {
            return Err("Recipe has no ingredients".to_string());
        }
        if self.instructions.is_empty() {
            return Err("Recipe has no instructions".to_string());
        }
        Ok(())
    }
}

/// A recipe saved by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: i64,
    pub user_id: String,
    pub recipe: Recipe,
    pub created_at: String,
}

const SELECT_COLUMNS: &str = "SELECT id, user_id, recipe_data, created_at FROM saved_recipes";

impl SavedRecipe {
    /// Create a SavedRecipe from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let recipe_data: String = row.get(2)?;
        let recipe = serde_json::from_str(&recipe_data)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            recipe,
            created_at: row.get(3)?,
        })
    }

    /// Insert a new saved recipe
    pub fn create(conn: &Connection, user_id: &str, recipe: &Recipe) -> DbResult<Self> {
        let recipe_data = serde_json::to_string(recipe)?;
        conn.execute(
            "INSERT INTO saved_recipes (user_id, recipe_data) VALUES (?1, ?2)",
            params![user_id, recipe_data],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, user_id, id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a saved recipe by ID, scoped to its owner
    pub fn get_by_id(conn: &Connection, user_id: &str, id: i64) -> DbResult<Option<Self>> {
        let sql = format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;

        match stmt.query_row(params![id, user_id], Self::from_row) {
            Ok(saved) => Ok(Some(saved)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's saved recipes, newest first
    pub fn list_for_user(conn: &Connection, user_id: &str) -> DbResult<Vec<Self>> {
        let sql = format!(
            "{} WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let recipes = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(recipes)
    }

    /// Delete a saved recipe. Returns false if the user has no such recipe.
    pub fn delete(conn: &Connection, user_id: &str, id: i64) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM saved_recipes WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }
}
