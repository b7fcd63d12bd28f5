//! Per-request HMAC authentication.

use crate::Credentials;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use sumsub_core::signature::{self, headers};

/// Authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Unix seconds the signature was computed for.
    pub timestamp: i64,
    /// Lowercase hex HMAC-SHA256.
    pub signature: String,
}

/// Signs outbound requests with the client's credentials.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Create a signer for the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Sign a request at the current time.
    pub fn sign(&self, method: &str, path: &str, body: &[u8]) -> SignedHeaders {
        self.sign_at(chrono::Utc::now().timestamp(), method, path, body)
    }

    /// Sign a request for an explicit timestamp.
    pub fn sign_at(&self, timestamp: i64, method: &str, path: &str, body: &[u8]) -> SignedHeaders {
        SignedHeaders {
            timestamp,
            signature: signature::sign_request(
                self.credentials.secret_bytes(),
                timestamp,
                method,
                path,
                body,
            ),
        }
    }

    /// Header map carrying the token, signature and timestamp.
    pub fn headers(&self, signed: &SignedHeaders) -> HeaderMap {
        let mut map = HeaderMap::new();
        insert(&mut map, headers::APP_TOKEN, self.credentials.app_token());
        insert(&mut map, headers::ACCESS_SIGNATURE, &signed.signature);
        insert(&mut map, headers::ACCESS_TIMESTAMP, &signed.timestamp.to_string());
        map
    }
}

fn insert(map: &mut HeaderMap, name: &str, value: &str) {
    if let (Ok(name), Ok(value)) = (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        map.insert(name, value);
    }
}
