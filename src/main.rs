//! SnapRecipe
//!
//! An MCP server that turns food photos into recipes and recipe ingredients
//! into shopping lists.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use snaprecipe::ai::{GeminiGenerator, RecipeGenerator};
use snaprecipe::build_info;
use snaprecipe::config::Config;
use snaprecipe::db;
use snaprecipe::mcp::SnapRecipeService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("snaprecipe=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    build_info::print_startup_banner(&config);

    // Ensure data directory exists
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize database
    eprintln!("Initializing database...");
    let database = db::Database::new(&config.database_path)?;

    // Run migrations
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    // Recipe generation is optional; the other tools work without an API key
    let generator: Option<Arc<dyn RecipeGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            let gemini: Arc<dyn RecipeGenerator> =
                Arc::new(GeminiGenerator::new(key.clone(), config.model.clone())?);
            Some(gemini)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, recipe generation is disabled");
            None
        }
    };

    // Create the SnapRecipe service
    let service = SnapRecipeService::new(&config, database, generator);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    eprintln!("Starting MCP server on stdio...");
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
