pub mod clarifai;
pub mod openai;
#[cfg(test)]
pub mod stub;

use async_trait::async_trait;
use bytes::Bytes;

use crate::audio::Voice;
use crate::error::AppError;

pub use clarifai::ClarifaiClient;
pub use openai::OpenAiClient;

/// Concept names in the order the labeling service ranked them.
pub type LabelSet = Vec<String>;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageInput {
    /// Raw base64 payload, without any `data:` prefix.
    Base64(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: Voice,
    pub speed: f32,
}

#[async_trait]
pub trait VisionLabeler: Send + Sync {
    async fn labels(&self, image: ImageInput) -> Result<LabelSet, AppError>;
}

#[async_trait]
pub trait TextCompleter: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, AppError>;
}
