// src/error.rs

//! Unified error handling for the search application.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error reported by the Product Advertising API
    #[error("API error ({code}): {message}")]
    Api { code: String, message: String },

    /// Request signing failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Remote failure without a recognizable error shape
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an API error from a code and message.
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create an unknown-failure error.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown(message.into())
    }
}
