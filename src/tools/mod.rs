//! SnapRecipe Tools module
//!
//! MCP tool implementations for SnapRecipe.

pub mod export;
pub mod generate;
pub mod ingredients;
pub mod profile;
pub mod recipes;
pub mod shopping_list;
pub mod status;

/// Validate and trim a user id
pub(crate) fn require_user(user_id: &str) -> Result<&str, String> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err("user_id cannot be empty".to_string());
    }
    Ok(user_id)
}
