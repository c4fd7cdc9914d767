//! Error types for calls against the build API

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while uploading artifacts or submitting a build
#[derive(Error, Debug)]
pub enum UploadError {
    /// The file selected for upload could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The service answered with a body that does not match the expected shape
    #[error("Invalid response from Ketryx: {0}")]
    InvalidResponse(String),
}

pub type UploadResult<T> = Result<T, UploadError>;

impl UploadError {
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// True when the service rejected the API key
    pub fn is_auth_error(&self) -> bool {
        matches!(self, UploadError::Api { status: 401 | 403, .. })
    }
}
