//! Fake recipe generator for testing.
//!
//! Returns a fixed outcome for every request and records the prompts it
//! would have sent, so tests run without network access or API costs.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::prompt::{image_prompt, remix_prompt};
use super::{GenerationError, ImagePayload, RecipeGenerator};
use crate::models::Recipe;

#[derive(Debug)]
pub struct FakeGenerator {
    outcome: Result<Recipe, GenerationError>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    /// Generator that answers every request with `recipe`
    pub fn returning(recipe: Recipe) -> Self {
        Self {
            outcome: Ok(recipe),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Generator that fails every request with `error`
    pub fn failing(error: GenerationError) -> Self {
        Self {
            outcome: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.prompts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn respond(&self, prompt: String) -> Result<Recipe, GenerationError> {
        self.lock().push(prompt);
        self.outcome.clone()
    }
}

#[async_trait]
impl RecipeGenerator for FakeGenerator {
    async fn generate_from_image(
        &self,
        _image: &ImagePayload,
        language: &str,
        dietary_context: Option<&str>,
    ) -> Result<Recipe, GenerationError> {
        self.respond(image_prompt(language, dietary_context))
    }

    async fn remix(&self, original: &Recipe, request: &str) -> Result<Recipe, GenerationError> {
        let prompt = remix_prompt(original, request)?;
        self.respond(prompt)
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::payload::tests::png_bytes;
    use crate::models::sample_recipe;

    #[tokio::test]
    async fn test_returning_records_prompts() {
        let generator = FakeGenerator::returning(sample_recipe("Tacos"));
        let image = ImagePayload::from_bytes(png_bytes()).unwrap();

        let recipe = generator
            .generate_from_image(&image, "German", Some("The user is vegan."))
            .await
            .unwrap();
        assert_eq!(recipe.recipe_name, "Tacos");

        generator.remix(&recipe, "less spicy").await.unwrap();

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("recipe in German"));
        assert!(prompts[0].contains("The user is vegan."));
        assert!(prompts[1].contains("less spicy"));
    }

    #[tokio::test]
    async fn test_failing() {
        let generator = FakeGenerator::failing(GenerationError::SafetyBlocked("SAFETY".into()));
        let image = ImagePayload::from_bytes(png_bytes()).unwrap();

        let err = generator
            .generate_from_image(&image, "English", None)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::SafetyBlocked(_)));
        assert_eq!(generator.call_count(), 1);
    }
}
