use std::sync::Arc;

use serde::Serialize;

use crate::error::AppError;
use crate::upstream::{CompletionRequest, ImageInput, TextCompleter, VisionLabeler};

/// Public sample image used to probe the labeling service.
pub const SAMPLE_IMAGE_URL: &str = "https://samples.clarifai.com/metro-north.jpg";
pub const HEALTHY_MESSAGE: &str = "All services are operational";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: Health,
    pub message: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == Health::Healthy
    }
}

pub struct HealthService {
    vision: Arc<dyn VisionLabeler>,
    text: Arc<dyn TextCompleter>,
}

impl HealthService {
    pub fn new(vision: Arc<dyn VisionLabeler>, text: Arc<dyn TextCompleter>) -> Self {
        Self { vision, text }
    }

    /// Probe vision, then text. Stops at the first failure.
    pub async fn check(&self) -> HealthStatus {
        match self.probe().await {
            Ok(()) => HealthStatus {
                status: Health::Healthy,
                message: HEALTHY_MESSAGE.to_string(),
            },
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                HealthStatus {
                    status: Health::Unhealthy,
                    message: e.details(),
                }
            }
        }
    }

    async fn probe(&self) -> Result<(), AppError> {
        self.vision
            .labels(ImageInput::Url(SAMPLE_IMAGE_URL.to_string()))
            .await?;

        self.text
            .complete(CompletionRequest {
                system: "You are a health check.".to_string(),
                prompt: "ping".to_string(),
                max_tokens: 5,
                temperature: None,
                top_p: None,
            })
            .await?;

        Ok(())
    }
}
