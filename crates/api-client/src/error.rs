//! Error types for the API client

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur talking to the REST API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request could not be sent or the response could not be read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The resource does not exist on the server
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Server answered with a non-success status
    #[error("Server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Missing or malformed configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Form input rejected before any request was made
    #[error("Invalid input: {0}")]
    Validation(#[from] taskdeck_core::Error),
}

impl ClientError {
    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
