//! Error types for the farm client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Boxed underlying cause carried by transport errors
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when using the farm client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The endpoint could not be resolved or connected to
    #[error("Could not reach {endpoint}: {source}")]
    Unreachable {
        /// Endpoint URL the client was configured with
        endpoint: String,
        /// Name-resolution or connection failure
        #[source]
        source: BoxError,
    },

    /// The request did not complete in time
    #[error("Request to {endpoint} timed out")]
    Timeout {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Service error code, when the body carried one
        code: Option<String>,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No route is known for the operation
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            code: None,
            message: message.into(),
        }
    }

    /// Check if this error means the endpoint could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Service error code, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::ApiError { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
