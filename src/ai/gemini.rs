//! Gemini API implementation of RecipeGenerator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::prompt::{image_prompt, parse_recipe_json, recipe_schema, remix_prompt};
use super::{GenerationError, ImagePayload, RecipeGenerator};
use crate::models::Recipe;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Finish reasons meaning the model refused to answer
const BLOCKED_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

/// Gemini recipe generator.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GeminiGenerator {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, GenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::NotConfigured(
                "GEMINI_API_KEY is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self {
            api_key,
            model: model.into(),
            client,
        })
    }

    async fn call_api(&self, request: &GeminiRequest) -> Result<String, GenerationError> {
        let url = format!("{}/{}:generateContent", API_BASE, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                GenerationError::Network(e.to_string())
            })?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            tracing::error!("Gemini API error: {} - {}", status, body);
            return Err(error_from_response(status, &body, retry_after));
        }

        extract_text(&body)
    }
}

/// Map an error response body to a GenerationError
fn error_from_response(status: u16, body: &str, retry_after: Option<u64>) -> GenerationError {
    let message = serde_json::from_str::<GeminiErrorResponse>(body)
        .map(|r| r.error.message)
        .unwrap_or_else(|_| body.to_string());
    GenerationError::from_status(status, message, retry_after)
}

/// Pull the generated text out of a successful response body
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Failed to parse Gemini response: {}", e);
        GenerationError::Parse(e.to_string())
    })?;

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::SafetyBlocked(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::Parse("No candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return match candidate.finish_reason {
            Some(reason) if BLOCKED_FINISH_REASONS.contains(&reason.as_str()) => {
                Err(GenerationError::SafetyBlocked(reason))
            }
            _ => Err(GenerationError::Parse("Empty response from model".to_string())),
        };
    }

    Ok(text)
}

fn build_request(parts: Vec<Part>) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: recipe_schema(),
        },
    }
}

#[async_trait]
impl RecipeGenerator for GeminiGenerator {
    async fn generate_from_image(
        &self,
        image: &ImagePayload,
        language: &str,
        dietary_context: Option<&str>,
    ) -> Result<Recipe, GenerationError> {
        let request = build_request(vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type().to_string(),
                    data: image.to_base64(),
                },
            },
            Part::Text {
                text: image_prompt(language, dietary_context),
            },
        ]);

        tracing::info!(model = %self.model, bytes = image.len(), "Generating recipe from image");
        let text = self.call_api(&request).await?;
        parse_recipe_json(&text)
    }

    async fn remix(&self, original: &Recipe, request: &str) -> Result<Recipe, GenerationError> {
        let request = build_request(vec![Part::Text {
            text: remix_prompt(original, request)?,
        }]);

        tracing::info!(model = %self.model, recipe = %original.recipe_name, "Remixing recipe");
        let text = self.call_api(&request).await?;
        parse_recipe_json(&text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
