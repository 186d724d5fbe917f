use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    /// The reading list could not be serialized into the prompt.
    #[error("failed to encode book list: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Network failure, timeout, or an unreadable response envelope.
    #[error("chat completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("chat completion API returned {status}: {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
