//! Recipe generation
//!
//! A trait over generative-AI backends that turn a food photo into a
//! [`Recipe`] or rework an existing recipe, with a Gemini implementation and
//! a deterministic fake for tests.

mod fake;
mod gemini;
mod payload;
mod prompt;

pub use fake::FakeGenerator;
pub use gemini::GeminiGenerator;
pub use payload::ImagePayload;
pub use prompt::{dietary_context, image_prompt, parse_recipe_json, remix_prompt};

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Recipe;

/// Error type for recipe generation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Generator not configured: {0}")]
    NotConfigured(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Service unavailable: {status} - {message}")]
    ServiceUnavailable { status: u16, message: String },

    #[error("Content blocked by safety filters: {0}")]
    SafetyBlocked(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl GenerationError {
    /// Classify a non-success HTTP response.
    pub fn from_status(status: u16, message: String, retry_after_secs: Option<u64>) -> Self {
        match status {
            429 => Self::RateLimited { retry_after_secs },
            500 | 502 | 503 | 504 => Self::ServiceUnavailable { status, message },
            401 | 403 => Self::NotConfigured(format!("API key rejected: {}", message)),
            _ if message.contains("API key") => Self::NotConfigured(message),
            _ if message.contains("SAFETY") || message.contains("blocked") => {
                Self::SafetyBlocked(message)
            }
            400 => Self::InvalidInput(message),
            _ => Self::Api { status, message },
        }
    }

    /// Whether trying again later might succeed. Nothing retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::ServiceUnavailable { .. } | Self::Network(_)
        )
    }

    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => {
                "The image could not be processed. Please upload a JPEG, PNG, GIF or WebP photo."
            }
            Self::NotConfigured(_) => "System Configuration Error: API Key is missing or invalid.",
            Self::RateLimited { .. } => {
                "We are receiving too many requests right now. Please wait a moment and try again."
            }
            Self::ServiceUnavailable { .. } => {
                "The AI service is currently experiencing issues. Please try again later."
            }
            Self::SafetyBlocked(_) => {
                "The AI could not generate a recipe for this image. Please try a different photo containing clear food items."
            }
            Self::Network(_) => "Network error. Please check your internet connection.",
            Self::Api { .. } | Self::Parse(_) => {
                "An unexpected error occurred while generating the recipe. Please try again."
            }
        }
    }
}

/// Trait for recipe generation backends.
///
/// Implementations must be thread-safe; one instance is shared by the server.
#[async_trait]
pub trait RecipeGenerator: Send + Sync + fmt::Debug {
    /// Generate a recipe for the dish shown in `image`, written in `language`.
    async fn generate_from_image(
        &self,
        image: &ImagePayload,
        language: &str,
        dietary_context: Option<&str>,
    ) -> Result<Recipe, GenerationError>;

    /// Rework `original` according to a free-text request ("make it vegan").
    async fn remix(&self, original: &Recipe, request: &str) -> Result<Recipe, GenerationError>;

    /// Model identifier, for status and logging
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(
            GenerationError::from_status(429, String::new(), Some(30)),
            GenerationError::RateLimited { retry_after_secs: Some(30) }
        );
        assert!(matches!(
            GenerationError::from_status(503, "overloaded".into(), None),
            GenerationError::ServiceUnavailable { status: 503, .. }
        ));
        assert!(matches!(
            GenerationError::from_status(403, "bad key".into(), None),
            GenerationError::NotConfigured(_)
        ));
        assert!(matches!(
            GenerationError::from_status(400, "Image is invalid".into(), None),
            GenerationError::InvalidInput(_)
        ));
        assert!(matches!(
            GenerationError::from_status(400, "Request blocked: SAFETY".into(), None),
            GenerationError::SafetyBlocked(_)
        ));
        assert!(matches!(
            GenerationError::from_status(418, "teapot".into(), None),
            GenerationError::Api { status: 418, .. }
        ));
    }

    #[test]
    fn test_retryable() {
        assert!(GenerationError::RateLimited { retry_after_secs: None }.is_retryable());
        assert!(GenerationError::Network("reset".into()).is_retryable());
        assert!(!GenerationError::InvalidInput("bad".into()).is_retryable());
        assert!(!GenerationError::SafetyBlocked("no".into()).is_retryable());
    }

    #[test]
    fn test_user_messages_hide_details() {
        let err = GenerationError::Api { status: 418, message: "internal detail".into() };
        assert!(!err.user_message().contains("internal detail"));
        assert!(GenerationError::Network("x".into()).user_message().contains("Network"));
    }
}
