use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{AudioRequest, AudioResponse, PoemRequest, PoemResponse};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::health::HealthStatus;

pub async fn generate_poem(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PoemRequest>, JsonRejection>,
) -> Result<Json<PoemResponse>, AppError> {
    let Json(request) = payload?;
    let result = state.poem.generate(&request.text, &request.photo).await?;

    Ok(Json(PoemResponse {
        generated_text: result.generated_text,
    }))
}

pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AudioRequest>, JsonRejection>,
) -> Result<Json<AudioResponse>, AppError> {
    let Json(request) = payload?;
    let result = state
        .audio
        .synthesize(&request.text, request.voice.as_deref(), request.speed)
        .await?;

    Ok(Json(AudioResponse {
        audio_content: result.audio_content,
    }))
}

pub async fn latest_result(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PoemResponse>, AppError> {
    state
        .poem
        .latest()
        .map(|generated_text| Json(PoemResponse { generated_text }))
        .ok_or_else(|| AppError::NotFound("No result available".into()))
}

pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthStatus>) {
    let status = state.health.check().await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (code, Json(status))
}
