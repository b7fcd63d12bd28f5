//! Error types for webhook handling

use crate::payload::WebhookData;
use sumsub_core::WebhookType;
use thiserror::Error;

/// Result type for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;

/// Errors that can occur while handling an inbound webhook
#[derive(Error, Debug)]
pub enum WebhookError {
    /// The signature header is absent or empty
    #[error("Missing x-payload-digest header")]
    MissingSignature,

    /// The body is not valid JSON, or a required field has the wrong type
    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(String),

    /// Signature mismatch or missing required field
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// One or more listeners failed
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl WebhookError {
    /// HTTP status a receiving endpoint should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Dispatch(_) => 500,
            _ => 400,
        }
    }

    /// Check if the request was rejected by validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The verified envelope, when listeners failed after it was parsed
    pub fn webhook_data(&self) -> Option<&WebhookData> {
        match self {
            Self::Dispatch(d) => Some(&d.webhook),
            _ => None,
        }
    }

    /// Fields reported missing by payload validation
    pub fn missing_fields(&self) -> &[String] {
        match self {
            Self::Validation(v) => &v.missing_fields,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::InvalidPayload(err.to_string())
    }
}

/// Validation failure with the list of offending fields
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Human readable message
    pub message: String,
    /// Missing required fields, in check order
    pub missing_fields: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            missing_fields: Vec::new(),
        }
    }

    pub fn invalid_signature() -> Self {
        Self::new("Invalid webhook signature")
    }

    pub fn missing_field(field: &str) -> Self {
        Self {
            message: format!("Missing required field: {}", field),
            missing_fields: vec![field.to_string()],
        }
    }
}

/// Error returned by a listener
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<String> for ListenerError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for ListenerError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// Listener failures collected during one dispatch
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} listener(s) failed for {kind}", .failures.len())]
pub struct DispatchError {
    /// Kind of the dispatched event
    pub kind: WebhookType,
    /// Errors in listener registration order
    pub failures: Vec<ListenerError>,
    /// Envelope of the event that was dispatched
    pub webhook: Box<WebhookData>,
}
