// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MaterialError>;

#[derive(Error, Debug)]
pub enum MaterialError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported language: {language}. Supported: {}", supported.join(", "))]
    UnsupportedLanguage {
        language: String,
        supported: Vec<String>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: String, seconds: u64 },

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl MaterialError {
    /// Errors raised before any network activity because the caller's input was rejected.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            MaterialError::Validation(_) | MaterialError::UnsupportedLanguage { .. }
        )
    }
}
