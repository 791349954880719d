use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("{service} API call failed: {details}")]
    Upstream {
        service: &'static str,
        details: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Unreadable or mistyped request bodies are the caller's fault.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    pub fn upstream(service: &'static str, details: impl Into<String>) -> Self {
        AppError::Upstream {
            service,
            details: details.into(),
        }
    }

    /// Text shown to callers that only need the cause, e.g. health checks.
    pub fn details(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Internal(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::Upstream { details, .. } => details.clone(),
            AppError::Io(e) => e.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "Invalid request".to_string(),
                Some(msg.clone()),
            ),
            AppError::Upstream { service, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{} API call failed", service),
                Some(details.clone()),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(msg.clone()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(e.to_string()),
            ),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {} - {}", error, details.as_deref().unwrap_or(""));
        } else {
            tracing::warn!("Request rejected: {} - {}", error, details.as_deref().unwrap_or(""));
        }

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
