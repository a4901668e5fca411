//! Error types for the Ring client.

use thiserror::Error;

/// Errors that can occur when using the Ring client.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection error (network failure, DNS resolution, timeout, etc.).
    #[error("connection error: {0}")]
    Connection(String),

    /// Non-success HTTP status from the remote service.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Response deserialization error.
    #[error("failed to deserialize response: {0}")]
    Deserialization(String),

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// `process` was called before a successful `register`.
    #[error("no associated ruleset: register() must succeed before process()")]
    NoExecutor,
}

impl Error {
    /// Returns `true` if retrying the same call could succeed.
    ///
    /// Connection errors and HTTP 5xx responses are retryable; everything
    /// else reflects a client-side problem.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Deserialization(_) | Self::Configuration(_) | Self::NoExecutor => false,
        }
    }

    /// Returns `true` if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if this is a caller mistake rather than a remote or
    /// transport failure.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::NoExecutor)
    }
}
