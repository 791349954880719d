use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AppError;

pub const MAX_TEXT_CHARS: usize = 10000;

lazy_static! {
    static ref DATA_URI_PREFIX: Regex =
        Regex::new(r"^data:image/[A-Za-z0-9.+-]+;base64,").unwrap();
}

/// A poem request that is safe to send upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// The note exactly as the caller sent it.
    pub text: String,
    /// Base64 image payload with any data-URI prefix removed.
    pub photo_base64: String,
}

pub fn validate_request(text: &str, photo: &str) -> Result<ValidatedRequest, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("text is required".into()));
    }

    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "text too long (max {} chars)",
            MAX_TEXT_CHARS
        )));
    }

    let photo = strip_data_uri(photo.trim());
    if photo.is_empty() {
        return Err(AppError::Validation("photo is required".into()));
    }

    if BASE64.decode(photo).is_err() {
        return Err(AppError::Validation(
            "photo must be valid base64-encoded image data".into(),
        ));
    }

    Ok(ValidatedRequest {
        text: text.to_string(),
        photo_base64: photo.to_string(),
    })
}

/// Remove a leading `data:image/...;base64,` if present.
pub fn strip_data_uri(photo: &str) -> &str {
    match DATA_URI_PREFIX.find(photo) {
        Some(m) => &photo[m.end()..],
        None => photo,
    }
}
