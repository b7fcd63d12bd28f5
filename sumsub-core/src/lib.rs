//! Core types for the Sumsub SDK
//!
//! This crate holds everything the API client, the webhook handler and the
//! portal export have in common:
//!
//! - **Signing**: HMAC request signatures and constant-time verification
//! - **Wire enums**: closed sets of values used by the remote API
//! - **Data objects**: applicants, reviews, addresses and documents
//! - **Summaries**: flattened, serializable views of applicants and documents
//!
//! # Example: Signing a Request
//!
//! ```rust
//! use sumsub_core::signature;
//!
//! let sig = signature::sign_request(b"secret", 1_700_000_000, "get", "/resources/applicants/abc/one", b"");
//! assert_eq!(sig.len(), 64);
//! ```
//!
//! # Example: Parsing an Applicant
//!
//! ```rust
//! use sumsub_core::ApplicantData;
//!
//! let applicant: ApplicantData = serde_json::from_value(serde_json::json!({
//!     "id": "5b594ade0a975a36c9349e66",
//!     "externalUserId": "user-42",
//!     "createdAt": "2024-01-01 10:00:00",
//!     "review": { "reviewStatus": "completed", "reviewResult": { "reviewAnswer": "GREEN" } }
//! })).unwrap();
//!
//! assert!(applicant.is_verified());
//! ```

pub mod de;
mod applicant;
mod document;
mod enums;
mod error;
pub mod signature;
mod summary;

pub use applicant::{
    AccessToken, AddressData, ApplicantData, ApplicantInfo, IdDocData, ReviewData,
    ReviewResultData,
};
pub use document::{DocSetStatus, DocumentCollection, DocumentData, RequiredIdDocsStatus};
pub use enums::{ApplicantType, DocumentType, ReviewAnswer, ReviewStatus, WebhookType};
pub use error::ParseEnumError;
pub use signature::DigestAlgorithm;
pub use summary::{
    AddressSummary, ApplicantSummary, DocumentSummary, NameSummary, PersonalInfoSummary,
    ReviewResultSummary, ReviewSummary,
};
