//! Runtime configuration
//!
//! Everything is read from environment variables once at startup.

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_REMIX_LIMIT: i64 = 20;
pub const DEFAULT_REMIX_WINDOW_SECS: u64 = 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    /// Gemini API key; generation tools fail with "not configured" without it
    pub gemini_api_key: Option<String>,
    pub model: String,
    /// Language recipes are generated in unless a request overrides it
    pub language: String,
    pub remix_limit: i64,
    pub remix_window_secs: u64,
}

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_path: non_empty("SNAPRECIPE_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_database_path),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            model: non_empty("SNAPRECIPE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            language: non_empty("SNAPRECIPE_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            remix_limit: parse_number(
                "SNAPRECIPE_REMIX_LIMIT",
                non_empty("SNAPRECIPE_REMIX_LIMIT"),
                DEFAULT_REMIX_LIMIT,
            )?,
            remix_window_secs: parse_number(
                "SNAPRECIPE_REMIX_WINDOW_SECS",
                non_empty("SNAPRECIPE_REMIX_WINDOW_SECS"),
                DEFAULT_REMIX_WINDOW_SECS,
            )?,
        })
    }
}

fn parse_number<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(n) if n >= T::default() => Ok(n),
            _ => Err(ConfigError::InvalidNumber { name, value: raw }),
        },
    }
}

/// Default database location: `<project>/data/snaprecipe.db`
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path.push("snaprecipe.db");
    path
}
