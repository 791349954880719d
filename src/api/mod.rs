pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

/// Missing fields arrive as empty strings so validation can report them.
#[derive(Debug, Deserialize)]
pub struct PoemRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub photo: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemResponse {
    pub generated_text: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioRequest {
    #[serde(default)]
    pub text: String,
    pub voice: Option<String>,
    pub speed: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioResponse {
    pub audio_content: String,
}
