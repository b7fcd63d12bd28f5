//! API error types.

use crate::ConfigError;
use serde_json::Value;
use thiserror::Error;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Message used when an error response carries no `description`.
pub const DEFAULT_ERROR_MESSAGE: &str = "API request failed";

/// Sumsub API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a status other than 200 or 201.
    #[error("{message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// `description` from the error body, or a generic message.
        message: String,
        /// Parsed error body, when it was JSON.
        body: Option<Value>,
        /// `correlationId` from the error body.
        correlation_id: Option<String>,
    },

    /// A successful response carried a body that is not valid JSON.
    #[error("Invalid JSON response: {0}")]
    InvalidResponse(String),

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// A request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// Reading an upload from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The client could not be configured.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// HTTP status code; `0` when no response was received.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Remote { status, .. } => *status,
            _ => 0,
        }
    }

    /// Correlation id reported by the API, if any.
    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            Self::Remote { correlation_id, .. } => correlation_id.as_deref(),
            _ => None,
        }
    }

    /// Parsed error body, if any.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            Self::Remote { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Check if the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == 404
    }

    /// Build a remote error from a status and raw response body.
    pub(crate) fn from_response(status: u16, raw: &[u8]) -> Self {
        let body = serde_json::from_slice::<Value>(raw).ok();

        let field = |name: &str| {
            body.as_ref()
                .and_then(|b| b.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self::Remote {
            status,
            message: field("description").unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            correlation_id: field("correlationId"),
            body,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
