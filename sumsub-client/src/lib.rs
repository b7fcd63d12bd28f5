//! # Sumsub Client
//!
//! Authenticated HTTP client for the Sumsub identity verification API.
//!
//! ## Features
//!
//! - **Request signing**: every call carries an HMAC-SHA256 signature over
//!   timestamp, method, path and body
//! - **Typed responses**: applicants, document status and access tokens decode
//!   into `sumsub-core` data objects
//! - **Document uploads**: multipart uploads from memory or from disk
//! - **Environment configuration**: `SUMSUB_*` variables and `.env` files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sumsub_client::{ClientConfig, SumsubClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SumsubClient::new(ClientConfig::new("app-token", "secret-key"))?;
//!
//!     let applicant = client.get_applicant_by_external_user_id("user-42").await?;
//!     println!("{} verified: {}", applicant.id, applicant.is_verified());
//!
//!     for doc in client.get_documents(&applicant.id).await?.approved().iter() {
//!         println!("approved image {:?}", doc.image_id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use sumsub_client::{ApiError, SumsubClient};
//!
//! # async fn run(client: SumsubClient) {
//! match client.get_applicant("missing").await {
//!     Ok(applicant) => println!("found {}", applicant.external_user_id),
//!     Err(ApiError::Remote { status: 404, correlation_id, .. }) => {
//!         println!("not found (correlation id {:?})", correlation_id);
//!     }
//!     Err(e) => eprintln!("request failed: {}", e),
//! }
//! # }
//! ```

mod client;
mod config;
mod error;
mod signer;
mod upload;

pub use client::SumsubClient;
pub use config::{
    ClientConfig, ClientConfigBuilder, ConfigError, Credentials, DEFAULT_BASE_URL, ENV_APP_TOKEN,
    ENV_BASE_URL, ENV_SECRET_KEY, ENV_TIMEOUT_SECS,
};
pub use error::{ApiError, DEFAULT_ERROR_MESSAGE, Result};
pub use signer::{RequestSigner, SignedHeaders};
pub use upload::{DocumentMetadata, DocumentUpload};
