use thiserror::Error;

use crate::decode::DecodeError;

pub type Result<T> = std::result::Result<T, TranscriptionError>;

/// Errors raised while sending a transcription request and reading its answer
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// Request rejected locally or by the endpoint as malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (missing or invalid API key)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Endpoint answered with a non-success status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Response body did not match the transcription shape
    #[error("Failed to decode transcription response: {0}")]
    Decode(#[from] DecodeError),
}

impl TranscriptionError {
    /// Map a non-success HTTP status and body to an error
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::InvalidRequest(message),
            401 => Self::AuthenticationFailed(message),
            _ => Self::ProviderApiError { status, message },
        }
    }
}
