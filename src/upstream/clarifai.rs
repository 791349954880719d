use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use super::{ImageInput, LabelSet, VisionLabeler};
use crate::config::ClarifaiConfig;
use crate::error::AppError;

const SERVICE: &str = "Clarifai";

/// Status code Clarifai reports for a successful call.
pub const STATUS_SUCCESS: u32 = 10000;

#[derive(Debug, Clone)]
pub struct ClarifaiClient {
    http: reqwest::Client,
    url: String,
    user_id: String,
    app_id: String,
    headers: HeaderMap,
}

impl ClarifaiClient {
    pub fn new(http: reqwest::Client, config: &ClarifaiConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Key {}", config.pat))
                .map_err(|e| AppError::Internal(format!("Invalid Clarifai key header: {}", e)))?,
        );

        Ok(Self {
            http,
            url: format!(
                "{}/v2/users/{}/apps/{}/models/{}/outputs",
                config.base_url, config.user_id, config.app_id, config.model_id
            ),
            user_id: config.user_id.clone(),
            app_id: config.app_id.clone(),
            headers,
        })
    }

    fn request_body(&self, image: ImageInput) -> PredictRequest {
        let image = match image {
            ImageInput::Base64(data) => Image {
                base64: Some(data),
                url: None,
            },
            ImageInput::Url(url) => Image {
                base64: None,
                url: Some(url),
            },
        };

        PredictRequest {
            user_app_id: UserAppId {
                user_id: self.user_id.clone(),
                app_id: self.app_id.clone(),
            },
            inputs: vec![Input {
                data: InputData { image },
            }],
        }
    }
}

#[async_trait]
impl VisionLabeler for ClarifaiClient {
    async fn labels(&self, image: ImageInput) -> Result<LabelSet, AppError> {
        let response = self
            .http
            .post(&self.url)
            .headers(self.headers.clone())
            .json(&self.request_body(image))
            .send()
            .await
            .map_err(|e| AppError::upstream(SERVICE, e.to_string()))?;

        let http_status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::upstream(SERVICE, e.to_string()))?;

        match serde_json::from_str::<PredictResponse>(&text) {
            Ok(body) => labels_from_response(body),
            Err(_) if !http_status.is_success() => {
                Err(AppError::upstream(SERVICE, format!("HTTP {}", http_status)))
            }
            Err(e) => Err(AppError::upstream(
                SERVICE,
                format!("failed to parse response: {}", e),
            )),
        }
    }
}

pub fn labels_from_response(body: PredictResponse) -> Result<LabelSet, AppError> {
    if body.status.code != STATUS_SUCCESS {
        return Err(AppError::upstream(SERVICE, body.status.description));
    }

    Ok(body
        .outputs
        .into_iter()
        .next()
        .map(|output| output.data.concepts.into_iter().map(|c| c.name).collect())
        .unwrap_or_default())
}

#[derive(Debug, Serialize)]
pub struct PredictRequest {
    pub user_app_id: UserAppId,
    pub inputs: Vec<Input>,
}

#[derive(Debug, Serialize)]
pub struct UserAppId {
    pub user_id: String,
    pub app_id: String,
}

#[derive(Debug, Serialize)]
pub struct Input {
    pub data: InputData,
}

#[derive(Debug, Serialize)]
pub struct InputData {
    pub image: Image,
}

#[derive(Debug, Serialize)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub status: Status,
    #[serde(default)]
    pub outputs: Vec<Output>,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    pub code: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub data: OutputData,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputData {
    #[serde(default)]
    pub concepts: Vec<Concept>,
}

#[derive(Debug, Deserialize)]
pub struct Concept {
    pub name: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub value: f32,
}
