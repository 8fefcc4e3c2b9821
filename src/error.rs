use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = NestconfError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum NestconfError {
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid key path '{key}': {reason}")]
    InvalidPath { key: String, reason: String },

    #[error("Cannot override '{0}': key does not exist in config")]
    OverrideTargetMissing(String),

    #[error("Invalid value '{value}' for '{key}': {reason}")]
    InvalidOverrideValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Invalid command line argument '{arg}': {reason}")]
    MalformedOverride { arg: String, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize {path}: {reason}")]
    SerializeError { path: PathBuf, reason: String },
}
