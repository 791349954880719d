use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use super::{CompletionRequest, SpeechRequest, SpeechSynthesizer, TextCompleter};
use crate::config::OpenAiConfig;
use crate::error::AppError;

const CHAT_SERVICE: &str = "OpenAI";
const SPEECH_SERVICE: &str = "OpenAI TTS";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    chat_model: String,
    tts_model: String,
    headers: HeaderMap,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, config: &OpenAiConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| AppError::Internal(format!("Invalid OpenAI key header: {}", e)))?,
        );

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            chat_model: config.chat_model.clone(),
            tts_model: config.tts_model.clone(),
            headers,
        })
    }

    async fn post<T: Serialize>(
        &self,
        service: &'static str,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, AppError> {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, path))
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::upstream(service, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Failed to read {} error body: {}", service, e);
                String::new()
            }
        };
        Err(AppError::upstream(service, error_message(status, &text)))
    }
}

/// Pull the message out of an OpenAI error body, falling back to the HTTP status.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status))
}

#[async_trait]
impl TextCompleter for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        let body = ChatCompletionRequest::new(&self.chat_model, request);
        let response: ChatCompletionResponse = self
            .post(CHAT_SERVICE, "chat/completions", &body)
            .await?
            .json()
            .await
            .map_err(|e| AppError::upstream(CHAT_SERVICE, format!("failed to parse response: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::upstream(CHAT_SERVICE, "response contained no content"))
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, AppError> {
        let body = SpeechBody {
            model: &self.tts_model,
            input: &request.text,
            voice: request.voice.as_str(),
            speed: request.speed,
        };

        self.post(SPEECH_SERVICE, "audio/speech", &body)
            .await?
            .bytes()
            .await
            .map_err(|e| AppError::upstream(SPEECH_SERVICE, e.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl ChatCompletionRequest {
    fn new(model: &str, request: CompletionRequest) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
