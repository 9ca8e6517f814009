//! Build metadata embedded by `build.rs`, plus the startup banner.

use serde::Serialize;

use crate::config::Config;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile-time facts about the running binary
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Counter bumped by every rebuild of a profile; 0 when not built by cargo
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: option_env!("SNAPRECIPE_BUILD_NUMBER")
                .and_then(|n| n.parse().ok())
                .unwrap_or(0),
            build_timestamp: option_env!("SNAPRECIPE_BUILD_TIMESTAMP").unwrap_or("unknown"),
            profile: option_env!("SNAPRECIPE_BUILD_PROFILE").unwrap_or("unknown"),
        }
    }
}

/// Banner lines describing the build and how this server instance is set up
pub fn startup_banner(config: &Config) -> Vec<String> {
    let info = BuildInfo::current();
    let generator = match &config.gemini_api_key {
        Some(_) => format!("Gemini ({})", config.model),
        None => "disabled (GEMINI_API_KEY not set)".to_string(),
    };

    vec![
        format!(
            "SnapRecipe {} (build {}, {}, {})",
            info.version, info.build_number, info.profile, info.build_timestamp
        ),
        format!("Database: {}", config.database_path.display()),
        format!("Recipe generator: {}", generator),
        format!(
            "Remix limit: {} per {}s, default language {}",
            config.remix_limit, config.remix_window_secs, config.language
        ),
    ]
}

/// Print the startup banner to stderr
pub fn print_startup_banner(config: &Config) {
    for line in startup_banner(config) {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_current() {
        let info = BuildInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.build_timestamp.is_empty());
    }

    #[test]
    fn test_banner_reflects_config() {
        let config = Config::from_lookup(|name| match name {
            "SNAPRECIPE_DATABASE_PATH" => Some("/tmp/recipes.db".to_string()),
            "GEMINI_API_KEY" => Some("key".to_string()),
            _ => None,
        })
        .unwrap();

        let banner = startup_banner(&config);
        assert!(banner[0].starts_with("SnapRecipe "));
        assert_eq!(banner[1], "Database: /tmp/recipes.db");
        assert_eq!(banner[2], format!("Recipe generator: Gemini ({})", config.model));
        assert_eq!(banner[3], "Remix limit: 20 per 3600s, default language English");

        let without_key = Config::from_lookup(|_| None).unwrap();
        assert!(startup_banner(&without_key)[2].contains("disabled"));
    }
}
