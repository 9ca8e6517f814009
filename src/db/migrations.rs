//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("Applied schema migration v1");
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- PROFILES
        -- Dietary preferences injected into recipe generation
        -- ============================================
        CREATE TABLE profiles (
            user_id TEXT PRIMARY KEY,
            dietary_prefs TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- SAVED RECIPES
        -- Generated recipes the user chose to keep
        -- ============================================
        CREATE TABLE saved_recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            recipe_data TEXT NOT NULL,                  -- JSON recipe document
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX idx_saved_recipes_user ON saved_recipes(user_id, created_at);

        -- ============================================
        -- SHOPPING LIST ITEMS
        -- Keyed logically by (user_id, text, recipe_name)
        -- ============================================
        CREATE TABLE shopping_list_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            text TEXT NOT NULL,
            recipe_name TEXT NOT NULL,
            checked INTEGER NOT NULL DEFAULT 0,         -- boolean
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_shopping_list_user ON shopping_list_items(user_id);
        CREATE INDEX idx_shopping_list_key ON shopping_list_items(user_id, recipe_name, text);

        -- ============================================
        -- GENERATION LOG
        -- One row per rate-limited generation request
        -- ============================================
        CREATE TABLE generation_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            function_name TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX idx_generation_log_user ON generation_log(user_id, function_name, created_at);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
