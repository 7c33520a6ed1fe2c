//! Domain error types

use std::path::PathBuf;

use thiserror::Error;

/// Error when parsing a lookback duration string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid duration: \"{input}\" ({reason}). Expected minutes (e.g., 10) or a duration like 30s, 2h30m")]
pub struct InvalidDurationError {
    pub input: String,
    pub reason: String,
}

impl InvalidDurationError {
    pub(crate) fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Error when an unknown preference value is provided
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: \"{input}\". Valid options: {valid}")]
pub struct InvalidChoiceError {
    pub kind: &'static str,
    pub input: String,
    pub valid: &'static str,
}

/// A path that cannot be represented as a string on this platform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("path is not valid Unicode: {}", .0.display())]
pub struct NonUnicodePath(pub PathBuf);

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
