pub mod cache;
pub mod prompt;
pub mod validate;

use std::sync::Arc;

use crate::error::AppError;
use crate::upstream::{CompletionRequest, ImageInput, LabelSet, TextCompleter, VisionLabeler};

pub use cache::LatestResultCache;

pub const SYSTEM_PROMPT: &str =
    "You are a poetic and insightful assistant. Always make sure your response is complete.";
pub const MAX_TOKENS: u32 = 150;
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct PoemResult {
    pub generated_text: String,
}

pub struct PoemService {
    vision: Arc<dyn VisionLabeler>,
    text: Arc<dyn TextCompleter>,
    cache: LatestResultCache,
}

impl PoemService {
    pub fn new(vision: Arc<dyn VisionLabeler>, text: Arc<dyn TextCompleter>) -> Self {
        Self {
            vision,
            text,
            cache: LatestResultCache::new(),
        }
    }

    pub async fn generate(&self, text: &str, photo: &str) -> Result<PoemResult, AppError> {
        // 1. Validate before anything goes upstream
        let request = validate::validate_request(text, photo)?;

        // 2. Label the photo
        let labels = self.extract_labels(request.photo_base64).await?;
        tracing::debug!("Labels: {}", labels.join(prompt::LABEL_SEPARATOR));

        // 3. Compose the prompt
        let prompt = prompt::compose(&labels, &request.text);

        // 4. Generate and remember the poem
        self.generate_text(prompt).await
    }

    pub async fn extract_labels(&self, photo_base64: String) -> Result<LabelSet, AppError> {
        self.vision.labels(ImageInput::Base64(photo_base64)).await
    }

    pub async fn generate_text(&self, prompt: String) -> Result<PoemResult, AppError> {
        tracing::debug!("Prompt length: {} chars", prompt.chars().count());

        let raw = self
            .text
            .complete(CompletionRequest {
                system: SYSTEM_PROMPT.to_string(),
                prompt,
                max_tokens: MAX_TOKENS,
                temperature: Some(TEMPERATURE),
                top_p: Some(TOP_P),
            })
            .await?;

        let generated_text = raw.trim().to_string();
        if generated_text.is_empty() {
            return Err(AppError::upstream("OpenAI", "generated text was empty"));
        }

        self.cache.set(&generated_text);
        tracing::info!("Generated poem ({} chars)", generated_text.chars().count());

        Ok(PoemResult { generated_text })
    }

    pub fn latest(&self) -> Option<String> {
        self.cache.get()
    }
}
