use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::audio::AudioService;
use crate::config::Config;
use crate::error::AppError;
use crate::health::HealthService;
use crate::poem::PoemService;
use crate::upstream::{
    ClarifaiClient, OpenAiClient, SpeechSynthesizer, TextCompleter, VisionLabeler,
};

/// Base64 photos from phone cameras run to several megabytes.
pub const BODY_LIMIT_BYTES: usize = 20 * 1024 * 1024;

pub struct AppState {
    pub poem: PoemService,
    pub audio: AudioService,
    pub health: HealthService,
}

impl AppState {
    pub fn new(config: &Config, http: reqwest::Client) -> Result<Self, AppError> {
        let vision = Arc::new(ClarifaiClient::new(http.clone(), &config.clarifai)?);
        let openai = Arc::new(OpenAiClient::new(http, &config.openai)?);

        Ok(Self::with_upstreams(vision, openai.clone(), openai))
    }

    pub fn with_upstreams(
        vision: Arc<dyn VisionLabeler>,
        text: Arc<dyn TextCompleter>,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            poem: PoemService::new(Arc::clone(&vision), Arc::clone(&text)),
            audio: AudioService::new(speech),
            health: HealthService::new(vision, text),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/generate-poem", post(handlers::generate_poem))
        .route("/generate-audio", post(handlers::generate_audio))
        .route("/latest-result", get(handlers::latest_result));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
