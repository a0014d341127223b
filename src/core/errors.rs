//! Custom error types for conversion runs

use thiserror::Error;

/// Exit status used when the input path is neither a file nor a directory
pub const INVALID_INPUT_EXIT_CODE: u8 = 84;

/// Conversion-related errors
#[derive(Error, Debug)]
pub enum CodeswapError {
    /// Input path does not exist or is neither a file nor a directory
    #[error("{path} is not a valid filepath")]
    InvalidInputPath {
        path: String,
    },

    /// Generation service answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
    },

    /// Invalid response from the generation service
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        message: String,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        path: String,
        message: String,
    },

    /// Some files could not be converted in a run that kept going
    #[error("{failed} file(s) failed to convert")]
    FilesFailed {
        failed: usize,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField {
        field: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl CodeswapError {
    /// Build a [`CodeswapError::FileError`] for `path`
    pub fn file(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        CodeswapError::FileError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CodeswapError::InvalidInputPath { .. } => INVALID_INPUT_EXIT_CODE,
            _ => 1,
        }
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, CodeswapError>;
