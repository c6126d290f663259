//! Error types for translation

use thiserror::Error;

/// Errors that can occur while loading translations.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Invalid language tag
    #[error("Invalid language tag: {0}")]
    InvalidLocale(String),

    /// A bundle value was not a string
    #[error("Translation for \"{0}\" must be a string")]
    InvalidTranslation(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}
