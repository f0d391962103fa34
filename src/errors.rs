/*!
 * Error types for the mortydex library.
 *
 * Each layer gets its own enum, built with the thiserror crate. Only
 * `ClientError` travels across the HTTP boundary; the listing pipeline turns
 * it into user-facing text and the debt editor logs it.
 */

use thiserror::Error;

/// Errors that can occur when talking to the catalog or the debt backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request could not be sent or the transport failed midway
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be decoded
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The service answered with a non-success status
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The service reported that nothing matched the request
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Error establishing a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The per-request timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The service rejected our credentials
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// A URL could not be built from the configured endpoint
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Whether this error is the catalog's "no matching results" signal
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidUrl(error.to_string())
    }
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid endpoint for {name}: {reason}")]
    InvalidEndpoint { name: &'static str, reason: String },

    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the debt editor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DebtError {
    /// A field was edited before any record was loaded
    #[error("No debt record is loaded")]
    NotLoaded,

    /// A numeric field received text that is not a number
    #[error("Field '{field}' expects a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// The field name is not one of the editable debt fields
    #[error("Unknown debt field: {0}")]
    UnknownField(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Debt error: {0}")]
    Debt(#[from] DebtError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
