//! Error types shared across the SDK

use thiserror::Error;

/// A wire string did not match any variant of a closed enumeration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} value: {value}")]
pub struct ParseEnumError {
    /// Name of the enumeration that rejected the value
    pub kind: &'static str,
    /// The rejected wire value
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
