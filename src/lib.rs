//! SnapRecipe Library
//!
//! Food photos to recipes, and recipe ingredients to shopping lists.

pub mod ai;
pub mod build_info;
pub mod config;
pub mod db;
pub mod ingredients;
pub mod mcp;
pub mod models;
pub mod tools;
