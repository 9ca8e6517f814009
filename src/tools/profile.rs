//! Profile MCP Tools
//!
//! Dietary preferences are free-text tags passed to the recipe generator as
//! context. `DIETARY_OPTIONS` lists the common ones.

use serde::Serialize;

use super::require_user;
use crate::db::Database;
use crate::models::Profile;

/// Suggested dietary preference tags
pub const DIETARY_OPTIONS: &[&str] = &[
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Dairy-Free",
    "Nut-Free",
    "Low-Carb",
    "Keto",
    "Paleo",
    "Halal",
    "Kosher",
];

/// Response for get_profile and update_profile
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub dietary_prefs: Vec<String>,
    /// None until the profile is first updated
    pub updated_at: Option<String>,
    pub dietary_options: &'static [&'static str],
}

impl ProfileResponse {
    fn empty(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            dietary_prefs: Vec::new(),
            updated_at: None,
            dietary_options: DIETARY_OPTIONS,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user_id: profile.user_id,
            dietary_prefs: profile.dietary_prefs,
            updated_at: Some(profile.updated_at),
            dietary_options: DIETARY_OPTIONS,
        }
    }
}

/// Trim, drop empties and de-duplicate case-insensitively, keeping the
/// first spelling of each tag in its original position
pub fn clean_prefs(prefs: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(prefs.len());
    for pref in prefs {
        let pref = pref.trim();
        if pref.is_empty() {
            continue;
        }
        let lower = pref.to_lowercase();
        if cleaned.iter().any(|p| p.to_lowercase() == lower) {
            continue;
        }
        cleaned.push(pref.to_string());
    }
    cleaned
}

/// Get a user's dietary preferences; an unknown user has none
pub fn get(db: &Database, user_id: &str) -> Result<ProfileResponse, String> {
    let user_id = require_user(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = Profile::get(&conn, user_id)
        .map_err(|e| format!("Failed to get profile: {}", e))?;

    Ok(profile
        .map(ProfileResponse::from)
        .unwrap_or_else(|| ProfileResponse::empty(user_id)))
}

/// Replace a user's dietary preferences
pub fn update(db: &Database, user_id: &str, prefs: &[String]) -> Result<ProfileResponse, String> {
    let user_id = require_user(user_id)?;
    let prefs = clean_prefs(prefs);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let profile = Profile::upsert(&conn, user_id, &prefs)
        .map_err(|e| format!("Failed to update profile: {}", e))?;

    tracing::info!(user_id, prefs = ?profile.dietary_prefs, "Updated dietary preferences");
    Ok(profile.into())
}
