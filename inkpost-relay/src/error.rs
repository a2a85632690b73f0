use inkpost_core::BoundaryError;

/// Errors that can occur while talking to the Telegram Bot API.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bot API error: {0}")]
    Api(String),

    #[error("File reference cannot be resolved")]
    FileNotFound,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RelayError {
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<RelayError> for BoundaryError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::FileNotFound => BoundaryError::FileNotFound,
            other => BoundaryError::unavailable(other.to_string()),
        }
    }
}
