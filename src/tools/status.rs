//! SnapRecipe Status Tool
//!
//! Provides runtime status information about the SnapRecipe service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Workflow notes for AI assistants driving the tools
pub const SNAPRECIPE_INSTRUCTIONS: &str = r#"
# SnapRecipe Instructions

SnapRecipe turns a photo of a dish into a recipe and keeps a per-user
shopping list built from recipe ingredients.

## Typical Workflow

1. `get_profile` to see the user's dietary preferences (optional)
2. `generate_recipe` with a data URL or image path; the profile's
   preferences are passed to the model automatically
3. `remix_recipe` to rework the result ("make it vegan", "less spicy")
4. `save_recipe` to keep it, or pass `save: true` to `generate_recipe`
5. `add_recipe_to_shopping_list` to turn the ingredients into shopping items
6. `toggle_shopping_item` as items are bought, `clear_shopping_list` when done

## Shopping List Items

Ingredient lines are normalized before they are added:

- Leading quantities are removed ("2", "1/2", "1 1/2", "½", "1-2", "0.5")
- One leading unit is removed, with an optional "of" ("cups", "tbsp of")
- Water and ice lines are skipped
- Lines that are only a quantity and unit are skipped

So "2 cups of flour" becomes "flour" and "1 cup water" is not added.
Anything after the item is kept as written ("garlic, minced").

A recipe is only added once per user. Adding a recipe whose name is already
on the list reports `already_present: true` and changes nothing.

Items are identified by their text together with the recipe name.

## Remix Limits

Remixes are rate limited per user (20 per hour by default). The
`remaining` field of a remix response shows how many are left.

## Exports

- `share_recipe_text` returns plain text suitable for messaging apps
- `export_recipe_pdf` and `export_shopping_list_pdf` write printable PDFs
"#;

/// Runtime status of the SnapRecipe service
#[derive(Debug, Clone, Serialize)]
pub struct SnapRecipeStatus {
    pub build: BuildInfo,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Generator information
    pub generator_configured: bool,
    pub generator_model: Option<String>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    generator_model: Option<String>,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf, generator_model: Option<String>) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            generator_model,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> SnapRecipeStatus {
        // Get database size if it exists
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        SnapRecipeStatus {
            build: BuildInfo::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            generator_configured: self.generator_model.is_some(),
            generator_model: self.generator_model.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_database_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snaprecipe.db");
        std::fs::write(&path, b"0123456789").unwrap();

        let tracker = StatusTracker::new(path.clone(), Some("fake".to_string()));
        let status = tracker.get_status();
        assert_eq!(status.database_size_bytes, Some(10));
        assert_eq!(status.database_path, path.display().to_string());
        assert!(status.generator_configured);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.build.version, crate::build_info::VERSION);
    }

    #[test]
    fn test_status_without_generator() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/snaprecipe.db"), None);
        let status = tracker.get_status();
        assert_eq!(status.database_size_bytes, None);
        assert!(!status.generator_configured);
    }
}
