use std::net::SocketAddr;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ClarifaiConfig {
    pub pat: String,
    pub user_id: String,
    pub app_id: String,
    pub model_id: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub tts_model: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub clarifai: ClarifaiConfig,
    pub openai: OpenAiConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = required("PORT")?
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?;

        let clarifai = ClarifaiConfig {
            pat: required("CLARIFAI_PAT")?,
            user_id: required("CLARIFAI_USER_ID")?,
            app_id: required("CLARIFAI_APP_ID")?,
            model_id: optional("CLARIFAI_MODEL_ID", "general-image-recognition"),
            base_url: optional("CLARIFAI_BASE_URL", "https://api.clarifai.com")
                .trim_end_matches('/')
                .to_string(),
        };

        let openai = OpenAiConfig {
            api_key: required("OPENAI_API_KEY")?,
            base_url: optional("OPENAI_BASE_URL", "https://api.openai.com/v1")
                .trim_end_matches('/')
                .to_string(),
            chat_model: optional("OPENAI_CHAT_MODEL", "gpt-3.5-turbo"),
            tts_model: optional("OPENAI_TTS_MODEL", "tts-1"),
        };

        Ok(Self {
            host: optional("HOST", "0.0.0.0"),
            port,
            clarifai,
            openai,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "HOST",
                reason: e.to_string(),
            })
    }
}
