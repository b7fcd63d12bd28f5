//! HMAC signature generation and verification
//!
//! The API client signs `{timestamp}{METHOD}{path}{body}` with HMAC-SHA256,
//! and the webhook verifier recomputes an HMAC over the raw payload with the
//! algorithm announced by the sender.

use crate::ParseEnumError;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Supported HMAC digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    /// HMAC-SHA1 (legacy webhook senders)
    Sha1,

    /// HMAC-SHA256 (default)
    #[default]
    Sha256,

    /// HMAC-SHA512
    Sha512,
}

impl DigestAlgorithm {
    /// Hash name, as used by `hash_hmac`-style APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Label carried by the `x-payload-digest-alg` webhook header
    pub fn header_label(&self) -> &'static str {
        match self {
            Self::Sha1 => "HMAC_SHA1_HEX",
            Self::Sha256 => "HMAC_SHA256_HEX",
            Self::Sha512 => "HMAC_SHA512_HEX",
        }
    }

    /// Map a digest-algorithm header label to an algorithm.
    ///
    /// Unrecognized labels fall back to SHA-256.
    pub fn from_header_label(label: &str) -> Self {
        match label.trim() {
            "HMAC_SHA1_HEX" => Self::Sha1,
            "HMAC_SHA256_HEX" => Self::Sha256,
            "HMAC_SHA512_HEX" => Self::Sha512,
            _ => Self::Sha256,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ParseEnumError::new("DigestAlgorithm", s)),
        }
    }
}

/// Compute a lowercase hex HMAC-SHA256 of `payload`
pub fn sign(secret: &[u8], payload: &[u8]) -> String {
    sign_with(DigestAlgorithm::Sha256, secret, payload)
}

/// Compute a lowercase hex HMAC of `payload` with the given algorithm
pub fn sign_with(algorithm: DigestAlgorithm, secret: &[u8], payload: &[u8]) -> String {
    hex::encode(compute_hmac(algorithm, secret, payload))
}

/// Verify a hex HMAC-SHA256 signature
pub fn verify(secret: &[u8], payload: &[u8], signature_hex: &str) -> bool {
    verify_with(DigestAlgorithm::Sha256, secret, payload, signature_hex)
}

/// Verify a hex HMAC signature with the given algorithm.
///
/// The supplied string must equal the lowercase hex digest exactly; the
/// comparison runs in constant time.
pub fn verify_with(
    algorithm: DigestAlgorithm,
    secret: &[u8],
    payload: &[u8],
    signature_hex: &str,
) -> bool {
    let expected = sign_with(algorithm, secret, payload);
    constant_time_compare(signature_hex.as_bytes(), expected.as_bytes())
}

/// Build the byte string signed for an API request:
/// `{timestamp}{UPPERCASE(method)}{path}{body}`
pub fn canonical_string(timestamp: i64, method: &str, path: &str, body: &[u8]) -> Vec<u8> {
    let head = format!("{}{}{}", timestamp, method.to_ascii_uppercase(), path);
    let mut canonical = Vec::with_capacity(head.len() + body.len());
    canonical.extend_from_slice(head.as_bytes());
    canonical.extend_from_slice(body);
    canonical
}

/// Sign an API request with HMAC-SHA256
pub fn sign_request(secret: &[u8], timestamp: i64, method: &str, path: &str, body: &[u8]) -> String {
    sign(secret, &canonical_string(timestamp, method, path, body))
}

fn compute_hmac(algorithm: DigestAlgorithm, secret: &[u8], payload: &[u8]) -> Vec<u8> {
    match algorithm {
        DigestAlgorithm::Sha1 => {
            let mut mac =
                HmacSha1::new_from_slice(secret).expect("HMAC can take any size key");
            mac.update(payload);
            mac.finalize().into_bytes().to_vec()
        }
        DigestAlgorithm::Sha256 => {
            let mut mac =
                HmacSha256::new_from_slice(secret).expect("HMAC can take any size key");
            mac.update(payload);
            mac.finalize().into_bytes().to_vec()
        }
        DigestAlgorithm::Sha512 => {
            let mut mac =
                HmacSha512::new_from_slice(secret).expect("HMAC can take any size key");
            mac.update(payload);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// Constant-time comparison to prevent timing attacks
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Header names used by the remote API
pub mod headers {
    /// Application token header on outbound requests
    pub const APP_TOKEN: &str = "X-App-Token";

    /// Request signature header on outbound requests
    pub const ACCESS_SIGNATURE: &str = "X-App-Access-Sig";

    /// Request timestamp header on outbound requests
    pub const ACCESS_TIMESTAMP: &str = "X-App-Access-Ts";

    /// Image id returned after a document upload
    pub const IMAGE_ID: &str = "X-Image-Id";

    /// Signature header on inbound webhooks
    pub const PAYLOAD_DIGEST: &str = "x-payload-digest";

    /// Algorithm label header on inbound webhooks
    pub const PAYLOAD_DIGEST_ALG: &str = "x-payload-digest-alg";
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sign_is_lowercase_hex() {
        let sig = sign(b"test-secret", b"payload");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_sign_known_vector() {
        // RFC 4231 test case 2
        let sig = sign(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_digest_lengths() {
        assert_eq!(sign_with(DigestAlgorithm::Sha1, b"k", b"p").len(), 40);
        assert_eq!(sign_with(DigestAlgorithm::Sha256, b"k", b"p").len(), 64);
        assert_eq!(sign_with(DigestAlgorithm::Sha512, b"k", b"p").len(), 128);
    }

    #[test]
    fn test_verify_round_trip() {
        let sig = sign(b"secret", b"payload");
        assert!(verify(b"secret", b"payload", &sig));
    }

    #[test]
    fn test_verify_requires_exact_lowercase_hex() {
        let sig = sign(b"secret", b"payload");
        assert!(!verify(b"secret", b"payload", &sig.to_uppercase()));
        assert!(!verify(b"secret", b"payload", &format!(" {}\n", sig)));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let sig = sign(b"secret1", b"payload");
        assert!(!verify(b"secret2", b"payload", &sig));
    }

    #[test]
    fn test_verify_malformed_hex() {
        assert!(!verify(b"secret", b"payload", "not-hex"));
        assert!(!verify(b"secret", b"payload", ""));
    }

    #[test]
    fn test_verify_algorithm_mismatch() {
        let sig = sign_with(DigestAlgorithm::Sha512, b"secret", b"payload");
        assert!(verify_with(DigestAlgorithm::Sha512, b"secret", b"payload", &sig));
        assert!(!verify_with(DigestAlgorithm::Sha256, b"secret", b"payload", &sig));
    }

    #[test]
    fn test_canonical_string() {
        let canonical = canonical_string(1700000000, "post", "/resources/applicants", b"{\"a\":1}");
        assert_eq!(
            canonical,
            b"1700000000POST/resources/applicants{\"a\":1}".to_vec()
        );
    }

    #[test]
    fn test_header_labels() {
        assert_eq!(DigestAlgorithm::from_header_label("HMAC_SHA1_HEX"), DigestAlgorithm::Sha1);
        assert_eq!(DigestAlgorithm::from_header_label("HMAC_SHA512_HEX"), DigestAlgorithm::Sha512);
        assert_eq!(DigestAlgorithm::from_header_label("HMAC_MD5_HEX"), DigestAlgorithm::Sha256);
        assert_eq!(DigestAlgorithm::from_header_label(""), DigestAlgorithm::Sha256);
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("SHA512".parse::<DigestAlgorithm>(), Ok(DigestAlgorithm::Sha512));
        assert!("md5".parse::<DigestAlgorithm>().is_err());
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare(b"abc", b"abc"));
        assert!(!constant_time_compare(b"abc", b"abd"));
        assert!(!constant_time_compare(b"abc", b"ab"));
        assert!(!constant_time_compare(b"", b"a"));
    }

    proptest! {
        #[test]
        fn prop_sign_request_is_deterministic(
            ts in 0i64..4_000_000_000,
            method in "(get|post|patch|delete)",
            path in "/[a-z/]{0,32}",
            body in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let a = sign_request(b"secret", ts, &method, &path, &body);
            let b = sign_request(b"secret", ts, &method.to_uppercase(), &path, &body);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_timestamp_changes_signature(ts in 0i64..4_000_000_000) {
            let a = sign_request(b"secret", ts, "GET", "/p", b"");
            let b = sign_request(b"secret", ts + 1, "GET", "/p", b"");
            prop_assert_ne!(a, b);
        }

        #[test]
        fn prop_method_changes_signature(
            ts in 0i64..4_000_000_000,
            path in "/[a-z/]{0,32}",
            body in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let get = sign_request(b"secret", ts, "GET", &path, &body);
            let post = sign_request(b"secret", ts, "POST", &path, &body);
            let patch = sign_request(b"secret", ts, "PATCH", &path, &body);
            prop_assert_ne!(&get, &post);
            prop_assert_ne!(&post, &patch);
            prop_assert_ne!(&get, &patch);
        }

        #[test]
        fn prop_path_changes_signature(
            ts in 0i64..4_000_000_000,
            path in "/[a-z/]{1,32}",
            suffix in "[a-z0-9]{1,8}",
            idx in any::<usize>(),
        ) {
            let original = sign_request(b"secret", ts, "GET", &path, b"");

            let extended = format!("{}{}", path, suffix);
            prop_assert_ne!(&original, &sign_request(b"secret", ts, "GET", &extended, b""));

            // Flip one character in place, keeping the length
            let mut bytes = path.clone().into_bytes();
            let i = idx % bytes.len();
            bytes[i] = if bytes[i] == b'x' { b'y' } else { b'x' };
            let replaced = String::from_utf8(bytes).unwrap();
            prop_assert_ne!(&original, &sign_request(b"secret", ts, "GET", &replaced, b""));
        }

        #[test]
        fn prop_body_changes_signature(
            ts in 0i64..4_000_000_000,
            body in proptest::collection::vec(any::<u8>(), 0..64),
            extra in any::<u8>(),
        ) {
            let mut longer = body.clone();
            longer.push(extra);
            prop_assert_ne!(
                sign_request(b"secret", ts, "POST", "/p", &body),
                sign_request(b"secret", ts, "POST", "/p", &longer)
            );
        }

        #[test]
        fn prop_mutated_payload_fails(payload in proptest::collection::vec(any::<u8>(), 1..128), idx in any::<usize>()) {
            let sig = sign(b"secret", &payload);
            prop_assert!(verify(b"secret", &payload, &sig));

            let mut mutated = payload.clone();
            let i = idx % mutated.len();
            mutated[i] ^= 0x01;
            prop_assert!(!verify(b"secret", &mutated, &sig));
        }
    }
}
