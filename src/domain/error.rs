//! Domain error types

use thiserror::Error;

/// Error when a confidence rating falls outside the 1-5 scale
#[derive(Debug, Clone, Copy, Error)]
#[error("Invalid confidence rating: {value}. Expected a value from 1 to 5")]
pub struct ConfidenceOutOfRange {
    pub value: u8,
}

/// Error when a recording handle carries no usable location
#[derive(Debug, Clone, Error)]
#[error("Recording produced an empty URI")]
pub struct EmptyRecordingUri;

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
