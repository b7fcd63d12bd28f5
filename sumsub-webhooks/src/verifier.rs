//! Inbound signature verification and payload validation

use crate::{Result, ValidationError, WebhookError};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use sumsub_core::signature::headers::{PAYLOAD_DIGEST, PAYLOAD_DIGEST_ALG};
use sumsub_core::signature::{self, DigestAlgorithm};
use tracing::warn;

/// Fields every notification must carry, in check order
pub const REQUIRED_FIELDS: [&str; 3] = ["type", "applicantId", "externalUserId"];

/// Read-only access to inbound request headers.
///
/// Lookups are case-insensitive. For multi-valued headers the first value
/// is returned.
pub trait HeaderSource {
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderSource for http::HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        // HeaderMap keys are stored lowercase
        self.get(name.to_ascii_lowercase().as_str())
            .and_then(|v| v.to_str().ok())
    }
}

impl<S: std::hash::BuildHasher> HeaderSource for HashMap<String, String, S> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl<S: std::hash::BuildHasher> HeaderSource for HashMap<String, Vec<String>, S> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.first())
            .map(String::as_str)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for [(K, V)] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.as_ref().eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_ref())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for Vec<(K, V)> {
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

/// Pull the payload digest out of the request headers.
///
/// An empty header counts as missing.
pub fn extract_signature<H: HeaderSource + ?Sized>(headers: &H) -> Result<&str> {
    headers
        .header(PAYLOAD_DIGEST)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(WebhookError::MissingSignature)
}

/// Digest algorithm announced by the sender, SHA-256 when absent
pub fn extract_algorithm<H: HeaderSource + ?Sized>(headers: &H) -> DigestAlgorithm {
    headers
        .header(PAYLOAD_DIGEST_ALG)
        .map(DigestAlgorithm::from_header_label)
        .unwrap_or_default()
}

/// Checks webhook signatures and required fields
#[derive(Clone)]
pub struct WebhookValidator {
    secret: SecretString,
}

impl WebhookValidator {
    /// Create a validator for the given webhook secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
        }
    }

    /// Verify the HMAC of the raw body against the supplied hex digest
    pub fn validate_signature(
        &self,
        payload: &[u8],
        signature: &str,
        algorithm: DigestAlgorithm,
    ) -> std::result::Result<(), ValidationError> {
        let secret = self.secret.expose_secret().as_bytes();

        if signature::verify_with(algorithm, secret, payload, signature) {
            Ok(())
        } else {
            warn!(algorithm = %algorithm, "Webhook signature mismatch");
            Err(ValidationError::invalid_signature())
        }
    }

    /// Check required fields are present and not null.
    ///
    /// Reports the first missing field only.
    pub fn validate_payload(&self, payload: &Value) -> std::result::Result<(), ValidationError> {
        for field in REQUIRED_FIELDS {
            if payload.get(field).is_none_or(Value::is_null) {
                warn!(field, "Webhook payload missing required field");
                return Err(ValidationError::missing_field(field));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for WebhookValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookValidator")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
