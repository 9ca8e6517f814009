//! Data models
//!
//! Rust structs representing database entities.

mod generation_log;
mod profile;
mod recipe;
mod shopping_list_item;

pub use generation_log::GenerationLog;
pub use profile::Profile;
pub use recipe::{Recipe, RecipeNutrition, SavedRecipe};
pub use shopping_list_item::ShoppingListItem;

#[cfg(test)]
pub(crate) use recipe::tests::sample_recipe;
