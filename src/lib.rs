// Sumsub - identity verification SDK for Rust
//
// Signs outbound API requests, verifies inbound webhooks and dispatches them
// as typed events, and exports verification data in portal format.

// Re-export core types
pub use sumsub_core::*;

// Re-export optional crates
#[cfg(feature = "client")]
pub use sumsub_client;

#[cfg(feature = "webhooks")]
pub use sumsub_webhooks;

#[cfg(feature = "portal")]
pub use sumsub_portal;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ApplicantData, DigestAlgorithm, DocumentCollection, DocumentData, ReviewAnswer,
        ReviewStatus, WebhookType,
    };

    #[cfg(feature = "client")]
    pub use sumsub_client::{ApiError, ClientConfig, DocumentMetadata, DocumentUpload, SumsubClient};

    #[cfg(feature = "webhooks")]
    pub use sumsub_webhooks::{
        ApplicantReviewed, Event, EventDispatcher, WebhookData, WebhookError, WebhookEvent,
        WebhookHandler,
    };

    #[cfg(feature = "portal")]
    pub use sumsub_portal::{PortalDataService, PortalUserData};
}
