//! Portal export for Sumsub verification data
//!
//! Reshapes an applicant, its address and its identity document images into
//! the flat record a partner portal imports.
//!
//! # Example
//!
//! ```rust,no_run
//! use sumsub_client::SumsubClient;
//! use sumsub_portal::PortalDataService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = PortalDataService::new(SumsubClient::from_env()?);
//!
//!     // Single user, with base64 document images
//!     let json = service.get_user_data_json("ref-001", true, true).await?;
//!     println!("{}", json);
//!
//!     // Several users, without images
//!     for (id, entry) in service.get_bulk_user_data(["ref-001", "ref-002"], false).await {
//!         println!("{}: found={}", id, entry.is_found());
//!     }
//!     Ok(())
//! }
//! ```

mod data;
mod service;

pub use data::{
    PortalAddressData, PortalDocumentData, PortalIndividualData, PortalUserData,
    IMAGE_DATA_URI_PREFIX,
};
pub use service::{BulkEntry, PortalDataService};
