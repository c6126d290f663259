// Error types for form options

use formguard_validation::RuleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load options: {0}")]
    LoadError(String),

    #[error("Failed to parse options: {0}")]
    ParseError(String),

    #[error("Invalid option \"{key}\": {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
