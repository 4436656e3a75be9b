use thiserror::Error;

/// Errors raised while moving a request to the service and back.
///
/// These never describe the service's answer: every answer that arrives is
/// handed to the classifier. A `TransportError` means no answer arrived.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request target could not be turned into a valid URL
    #[error("Invalid request target: {0}")]
    InvalidTarget(String),

    /// Network or connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_builder() {
            TransportError::InvalidTarget(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Connection(err.to_string())
        }
    }
}

/// Errors when assembling a content reference from optional parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// Neither an identifier nor a source URL was given
    #[error("Either an identifier or a source URL is required")]
    Missing,

    /// Both an identifier and a source URL were given
    #[error("Only one of identifier ({identifier}) or source URL ({url}) may be given")]
    Ambiguous { identifier: String, url: String },

    /// The identifier or URL was present but empty
    #[error("Content reference must not be empty")]
    Empty,
}

/// Errors in client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The API path is not an absolute URL
    #[error("Invalid API path '{path}': {reason}")]
    InvalidApiPath { path: String, reason: String },

    /// The API path does not end with a slash
    #[error("API path must end with '/': {0}")]
    MissingTrailingSlash(String),
}
