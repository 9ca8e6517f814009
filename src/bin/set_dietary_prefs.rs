//! Utility to set a user's dietary preferences in the database
//!
//! Usage: set_dietary_prefs <user_id> [pref ...]

use snaprecipe::config::Config;
use snaprecipe::tools::profile::{self, DIETARY_OPTIONS};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(user_id) = args.next() else {
        eprintln!("Usage: set_dietary_prefs <user_id> [pref ...]");
        eprintln!("Common preferences: {}", DIETARY_OPTIONS.join(", "));
        std::process::exit(2);
    };
    let prefs: Vec<String> = args.collect();

    let config = Config::from_env()?;
    println!("Database path: {}", config.database_path.display());
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = snaprecipe::db::Database::new(&config.database_path)?;

    // Run migrations
    database.with_conn(|conn| {
        snaprecipe::db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    let updated = profile::update(&database, &user_id, &prefs)?;
    println!("Dietary preferences set:");
    println!("  User: {}", updated.user_id);
    if updated.dietary_prefs.is_empty() {
        println!("  Preferences: (none)");
    } else {
        println!("  Preferences: {}", updated.dietary_prefs.join(", "));
    }
    if let Some(ts) = &updated.updated_at {
        println!("  Updated: {}", ts);
    }

    Ok(())
}
